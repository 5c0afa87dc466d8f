//! 数据库行映射结构

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// POS 数据库行
#[derive(Debug, FromRow)]
pub struct PosRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pos_type: String,
    pub campus: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
