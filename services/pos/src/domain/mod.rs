//! 领域层
//!
//! 包含 POS 实体、枚举、仓储接口和外部地图节点端口

pub mod entities;
pub mod enums;
pub mod repositories;
pub mod services;

pub use entities::*;
pub use enums::*;
pub use repositories::*;
pub use services::*;
