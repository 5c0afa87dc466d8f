//! 请求/响应 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CampusType, Pos, PosId, PosType};
use crate::error::{ServiceError, ServiceResult};

/// POS 的 JSON 表示
///
/// 请求中可省略 `id`、`createdAt`、`updatedAt`；客户端提供的时间戳会被忽略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosDto {
    #[serde(default)]
    pub id: Option<PosId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PosDto {
    /// 校验必填字段
    pub fn validate(&self) -> ServiceResult<()> {
        let required = [
            ("name", &self.name),
            ("street", &self.street),
            ("houseNumber", &self.house_number),
            ("city", &self.city),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ServiceError::Validation(format!("{} must not be blank", field)));
        }

        if self.description.is_none() {
            return Err(ServiceError::Validation(
                "description must be present".to_string(),
            ));
        }

        if self.postal_code <= 0 {
            return Err(ServiceError::Validation(
                "postalCode must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// 转换为领域对象（丢弃客户端时间戳）
    pub fn into_domain(self) -> Pos {
        Pos {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            pos_type: self.pos_type,
            campus: self.campus,
            street: self.street,
            house_number: self.house_number,
            postal_code: self.postal_code,
            city: self.city,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<Pos> for PosDto {
    fn from(pos: Pos) -> Self {
        Self {
            id: pos.id,
            name: pos.name,
            description: Some(pos.description),
            pos_type: pos.pos_type,
            campus: pos.campus,
            street: pos.street,
            house_number: pos.house_number,
            postal_code: pos.postal_code,
            city: pos.city,
            created_at: pos.created_at,
            updated_at: pos.updated_at,
        }
    }
}
