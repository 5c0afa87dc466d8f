//! POS 应用服务
//!
//! 负责创建/更新决策、名称唯一性错误处理以及 OSM 节点导入

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, error, info, warn};

use crate::domain::{CampusType, OsmNode, OsmNodeFetcher, Pos, PosId, PosRepository, PosType};
use crate::error::{ServiceError, ServiceResult};

pub struct PosService {
    repository: Arc<dyn PosRepository>,
    osm_fetcher: Arc<dyn OsmNodeFetcher>,
}

impl PosService {
    pub fn new(repository: Arc<dyn PosRepository>, osm_fetcher: Arc<dyn OsmNodeFetcher>) -> Self {
        Self {
            repository,
            osm_fetcher,
        }
    }

    /// 返回全部 POS（可能为空）
    pub async fn get_all(&self) -> ServiceResult<Vec<Pos>> {
        let all = self.repository.find_all().await?;
        debug!(count = all.len(), "Retrieved all POS");
        Ok(all)
    }

    pub async fn get_by_id(&self, id: PosId) -> ServiceResult<Pos> {
        debug!(%id, "Retrieving POS by ID");
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::PosNotFound(id))
    }

    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Pos> {
        debug!(name, "Retrieving POS by name");
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::PosNameNotFound(name.to_string()))
    }

    /// 创建（`id` 为空）或更新（`id` 必须已存在）
    pub async fn upsert(&self, pos: Pos) -> ServiceResult<Pos> {
        let operation = match pos.id {
            None => "create",
            Some(id) => {
                if self.repository.find_by_id(id).await?.is_none() {
                    warn!(%id, "Attempted to update non-existent POS");
                    return Err(ServiceError::PosNotFound(id));
                }
                "update"
            }
        };

        match self.repository.upsert(&pos).await {
            Ok(saved) => {
                counter!("pos_upserts_total", "operation" => operation).increment(1);
                info!(
                    id = ?saved.id,
                    name = %saved.name,
                    operation,
                    "POS persisted"
                );
                Ok(saved)
            }
            Err(e @ ServiceError::DuplicatePosName(_)) => {
                error!(name = %pos.name, operation, "POS name already in use");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// 从 OpenStreetMap 节点导入 POS
    ///
    /// 名称已存在时更新该记录而不是创建新记录
    pub async fn import_from_osm_node(&self, node_id: i64, campus: CampusType) -> ServiceResult<Pos> {
        let result = self.import(node_id, campus).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(ServiceError::OsmNodeNotFound(_)) => "node_not_found",
            Err(ServiceError::OsmNodeMissingFields { .. }) => "missing_fields",
            Err(_) => "error",
        };
        counter!("osm_imports_total", "outcome" => outcome).increment(1);

        result
    }

    async fn import(&self, node_id: i64, campus: CampusType) -> ServiceResult<Pos> {
        let node = self.osm_fetcher.fetch_node(node_id).await?;
        let mut candidate = Self::pos_from_osm_node(node, campus)?;

        if let Some(existing) = self.repository.find_by_name(&candidate.name).await? {
            candidate.id = existing.id;
        }

        let saved = self.upsert(candidate).await?;
        info!(
            node_id,
            id = ?saved.id,
            name = %saved.name,
            "Imported POS from OpenStreetMap node"
        );
        Ok(saved)
    }

    fn pos_from_osm_node(node: OsmNode, campus: CampusType) -> ServiceResult<Pos> {
        let postal_code = match node.postcode.parse::<i32>() {
            Ok(code) => code,
            Err(_) => {
                error!(
                    node_id = node.node_id,
                    postcode = %node.postcode,
                    "OSM node has no usable postcode"
                );
                return Err(ServiceError::missing_field(node.node_id, "postcode"));
            }
        };

        Ok(Pos {
            id: None,
            name: node.name,
            description: node.description,
            pos_type: PosType::from(node.amenity),
            campus,
            street: node.street,
            house_number: node.house_number,
            postal_code,
            city: node.city,
            created_at: None,
            updated_at: None,
        })
    }

    /// 删除全部 POS（仅用于测试和管理）
    pub async fn clear(&self) -> ServiceResult<()> {
        warn!("Clearing all POS records");
        self.repository.clear().await
    }
}
