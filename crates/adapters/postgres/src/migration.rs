//! 内置迁移执行器
//!
//! 只向前应用迁移，不做回滚；已应用版本记录在 `_migrations` 表中

use std::collections::HashMap;

use campus_errors::{AppError, AppResult};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::info;

const MIGRATIONS_TABLE: &str = "_migrations";

/// 一条内置迁移
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    /// `up_sql` 的 SHA-256（十六进制）
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = hex::encode(Sha256::digest(up_sql.as_bytes()));
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }
}

/// `_migrations` 表中的一行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub checksum: String,
}

/// 单条迁移的处理方式
#[derive(Debug, PartialEq, Eq)]
pub enum MigrationStep<'a> {
    Apply(&'a Migration),
    Skip(i64),
    /// 已应用的迁移内容被修改过
    ChecksumMismatch(&'a Migration),
}

/// 按版本排序，对比已应用记录得出执行计划
pub fn plan<'a>(migrations: &'a [Migration], applied: &[AppliedMigration]) -> Vec<MigrationStep<'a>> {
    let recorded: HashMap<i64, &str> = applied
        .iter()
        .map(|r| (r.version, r.checksum.as_str()))
        .collect();

    let mut ordered: Vec<&Migration> = migrations.iter().collect();
    ordered.sort_by_key(|m| m.version);

    ordered
        .into_iter()
        .map(|m| match recorded.get(&m.version) {
            None => MigrationStep::Apply(m),
            Some(checksum) if *checksum == m.checksum => MigrationStep::Skip(m.version),
            Some(_) => MigrationStep::ChecksumMismatch(m),
        })
        .collect()
}

/// 迁移执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
}

pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 应用所有未记录的迁移
    ///
    /// 遇到校验和不一致或执行失败时立即返回错误，后续迁移不再执行
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationReport> {
        self.ensure_table().await?;
        let applied = self.applied().await?;

        let mut report = MigrationReport::default();
        for step in plan(migrations, &applied) {
            match step {
                MigrationStep::Skip(version) => report.skipped.push(version),
                MigrationStep::ChecksumMismatch(m) => {
                    return Err(AppError::database(format!(
                        "Migration {} ({}) was modified after being applied",
                        m.version, m.name
                    )));
                }
                MigrationStep::Apply(m) => {
                    self.apply(m).await?;
                    report.applied.push(m.version);
                }
            }
        }

        Ok(report)
    }

    async fn ensure_table(&self) -> AppResult<()> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {MIGRATIONS_TABLE} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )
            "#
        );

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;
        Ok(())
    }

    async fn applied(&self) -> AppResult<Vec<AppliedMigration>> {
        let sql = format!("SELECT version, checksum FROM {MIGRATIONS_TABLE} ORDER BY version");

        sqlx::query_as::<_, AppliedMigration>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read applied migrations: {}", e)))
    }

    /// 迁移 SQL 与版本记录在同一事务中提交
    async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        // 迁移文件可能包含多条语句
        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {} ({}): {}",
                    migration.version, migration.name, e
                ))
            })?;

        let record_sql =
            format!("INSERT INTO {MIGRATIONS_TABLE} (version, name, checksum) VALUES ($1, $2, $3)");
        sqlx::query(&record_sql)
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

        info!(version = migration.version, name = %migration.name, "Migration applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(m: &Migration) -> AppliedMigration {
        AppliedMigration {
            version: m.version,
            checksum: m.checksum.clone(),
        }
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        let m = Migration::new(1, "create_pos", "CREATE TABLE pos (id BIGSERIAL PRIMARY KEY)");
        assert_eq!(m.checksum.len(), 64);
        assert_eq!(
            m.checksum,
            Migration::new(1, "renamed", "CREATE TABLE pos (id BIGSERIAL PRIMARY KEY)").checksum
        );
        assert_ne!(m.checksum, Migration::new(1, "create_pos", "CREATE TABLE x (id INT)").checksum);
    }

    #[test]
    fn test_plan_orders_by_version() {
        let migrations = vec![
            Migration::new(2, "add_index", "CREATE INDEX pos_city ON pos (city)"),
            Migration::new(1, "create_pos", "CREATE TABLE pos (id BIGSERIAL PRIMARY KEY)"),
        ];

        let steps = plan(&migrations, &[]);
        assert_eq!(
            steps,
            vec![
                MigrationStep::Apply(&migrations[1]),
                MigrationStep::Apply(&migrations[0]),
            ]
        );
    }

    #[test]
    fn test_plan_skips_recorded_versions() {
        let migrations = vec![
            Migration::new(1, "create_pos", "CREATE TABLE pos (id BIGSERIAL PRIMARY KEY)"),
            Migration::new(2, "add_index", "CREATE INDEX pos_city ON pos (city)"),
        ];

        let steps = plan(&migrations, &[applied(&migrations[0])]);
        assert_eq!(
            steps,
            vec![MigrationStep::Skip(1), MigrationStep::Apply(&migrations[1])]
        );
    }

    #[test]
    fn test_plan_detects_modified_migration() {
        let original = Migration::new(1, "create_pos", "CREATE TABLE pos (id BIGSERIAL PRIMARY KEY)");
        let edited = vec![Migration::new(1, "create_pos", "CREATE TABLE pos (id SERIAL PRIMARY KEY)")];

        let steps = plan(&edited, &[applied(&original)]);
        assert_eq!(steps, vec![MigrationStep::ChecksumMismatch(&edited[0])]);
    }
}
