//! 应用层

mod pos_service;

pub use pos_service::PosService;
