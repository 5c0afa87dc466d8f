//! 固定节点集合，供测试和离线运行使用

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{OsmNode, OsmNodeFetcher};
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Default, Clone)]
pub struct StaticOsmNodeFetcher {
    nodes: HashMap<i64, OsmNode>,
}

impl StaticOsmNodeFetcher {
    pub fn new(nodes: impl IntoIterator<Item = OsmNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.node_id, n)).collect(),
        }
    }
}

#[async_trait]
impl OsmNodeFetcher for StaticOsmNodeFetcher {
    async fn fetch_node(&self, node_id: i64) -> ServiceResult<OsmNode> {
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or(ServiceError::OsmNodeNotFound(node_id))
    }
}
