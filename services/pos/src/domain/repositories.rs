//! POS 仓储接口

use async_trait::async_trait;

use crate::error::ServiceResult;

use super::entities::{Pos, PosId};

/// POS 仓储接口
///
/// 实现必须保证名称唯一：冲突时返回 `ServiceError::DuplicatePosName`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosRepository: Send + Sync {
    /// 按 ID 升序返回全部记录
    async fn find_all(&self) -> ServiceResult<Vec<Pos>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: PosId) -> ServiceResult<Option<Pos>>;

    /// 根据名称精确查找
    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Pos>>;

    /// `id` 为空时插入，否则按 ID 更新；返回持久化后的记录
    ///
    /// 更新不存在的 ID 返回 `ServiceError::PosNotFound`
    async fn upsert(&self, pos: &Pos) -> ServiceResult<Pos>;

    /// 删除全部记录并重置 ID 序列
    async fn clear(&self) -> ServiceResult<()>;
}
