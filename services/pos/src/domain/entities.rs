//! 领域实体

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use super::enums::{CampusType, OsmAmenity, PosType};

/// POS ID，由持久层分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PosId(pub i64);

/// 校园销售点（咖啡馆、面包店、自动售货机等）
///
/// `id` 为 `None` 表示尚未持久化；时间戳只由持久层写入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    pub id: Option<PosId>,
    pub name: String,
    pub description: String,
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pos {
    pub fn with_id(mut self, id: PosId) -> Self {
        self.id = Some(id);
        self
    }
}

/// OpenStreetMap 节点（只读，仅作为导入输入）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmNode {
    pub node_id: i64,
    pub name: String,
    pub description: String,
    pub amenity: OsmAmenity,
    pub street: String,
    pub house_number: String,
    pub postcode: String,
    pub city: String,
}
