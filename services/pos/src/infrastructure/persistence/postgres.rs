//! PostgreSQL POS 仓储实现

use async_trait::async_trait;
use campus_adapter_postgres::{Migration, is_unique_violation, map_sqlx_error};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::{Pos, PosId, PosRepository};
use crate::error::{ServiceError, ServiceResult};

use super::converters::pos_from_row;
use super::rows::PosRow;

const POS_COLUMNS: &str = "id, name, description, pos_type, campus, street, house_number, \
                           postal_code, city, created_at, updated_at";

/// 服务内置迁移
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_pos",
        include_str!("../../../migrations/0001_create_pos.sql"),
    )]
}

/// 写入失败时区分名称冲突与其他数据库错误
fn map_write_error(e: sqlx::Error, name: &str) -> ServiceError {
    if is_unique_violation(&e) {
        ServiceError::DuplicatePosName(name.to_string())
    } else {
        ServiceError::Infrastructure(map_sqlx_error(e))
    }
}

pub struct PostgresPosRepository {
    pool: PgPool,
}

impl PostgresPosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, pos: &Pos) -> ServiceResult<Pos> {
        let sql = format!(
            r#"
            INSERT INTO pos (name, description, pos_type, campus, street, house_number, postal_code, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {POS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PosRow>(&sql)
            .bind(&pos.name)
            .bind(&pos.description)
            .bind(pos.pos_type.as_str())
            .bind(pos.campus.as_str())
            .bind(&pos.street)
            .bind(&pos.house_number)
            .bind(pos.postal_code)
            .bind(&pos.city)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &pos.name))?;

        pos_from_row(row)
    }

    async fn update(&self, id: PosId, pos: &Pos) -> ServiceResult<Pos> {
        let sql = format!(
            r#"
            UPDATE pos
            SET name = $2, description = $3, pos_type = $4, campus = $5,
                street = $6, house_number = $7, postal_code = $8, city = $9,
                updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $1
            RETURNING {POS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PosRow>(&sql)
            .bind(id.0)
            .bind(&pos.name)
            .bind(&pos.description)
            .bind(pos.pos_type.as_str())
            .bind(pos.campus.as_str())
            .bind(&pos.street)
            .bind(&pos.house_number)
            .bind(pos.postal_code)
            .bind(&pos.city)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &pos.name))?;

        match row {
            Some(row) => pos_from_row(row),
            None => Err(ServiceError::PosNotFound(id)),
        }
    }
}

#[async_trait]
impl PosRepository for PostgresPosRepository {
    async fn find_all(&self) -> ServiceResult<Vec<Pos>> {
        let sql = format!("SELECT {POS_COLUMNS} FROM pos ORDER BY id ASC");
        let rows = sqlx::query_as::<_, PosRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(pos_from_row).collect()
    }

    async fn find_by_id(&self, id: PosId) -> ServiceResult<Option<Pos>> {
        let sql = format!("SELECT {POS_COLUMNS} FROM pos WHERE id = $1");
        let row = sqlx::query_as::<_, PosRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(pos_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Pos>> {
        let sql = format!("SELECT {POS_COLUMNS} FROM pos WHERE name = $1");
        let row = sqlx::query_as::<_, PosRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(pos_from_row).transpose()
    }

    async fn upsert(&self, pos: &Pos) -> ServiceResult<Pos> {
        match pos.id {
            None => self.insert(pos).await,
            Some(id) => self.update(id, pos).await,
        }
    }

    async fn clear(&self) -> ServiceResult<()> {
        sqlx::query("TRUNCATE TABLE pos RESTART IDENTITY")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!("POS table truncated");
        Ok(())
    }
}
