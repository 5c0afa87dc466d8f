//! 外部地图数据端口

use async_trait::async_trait;

use crate::error::ServiceResult;

use super::entities::OsmNode;

/// OpenStreetMap 节点获取接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OsmNodeFetcher: Send + Sync {
    /// 获取节点；无法获取时返回 `ServiceError::OsmNodeNotFound`
    async fn fetch_node(&self, node_id: i64) -> ServiceResult<OsmNode>;
}
