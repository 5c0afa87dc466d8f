//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use campus_adapter_postgres::{Migration, MigrationManager, PostgresConfig, create_pool};
use campus_config::AppConfig;
use campus_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化，通过 `Arc` 共享给服务
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// 应用服务内置的迁移
    ///
    /// `database.run_migrations = false` 时跳过
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        if !self.config.database.run_migrations {
            info!("Migrations disabled by configuration, skipping");
            return Ok(());
        }

        let report = MigrationManager::new(self.postgres_pool.clone())
            .migrate(migrations)
            .await?;

        info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "Migrations completed"
        );
        Ok(())
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }
}
