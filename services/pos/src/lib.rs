//! pos-service - 校园咖啡销售点服务
//!
//! 提供 POS 记录的查询、创建、更新以及从 OpenStreetMap 导入

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
