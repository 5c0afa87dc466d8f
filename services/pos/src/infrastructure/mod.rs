//! 基础设施层

pub mod osm;
pub mod persistence;
