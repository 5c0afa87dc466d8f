//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use campus_config::AppConfig;
use campus_errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::health::{HealthChecker, health_routes};
use crate::http_metrics::{MetricsRecorder, metrics_routes, track_http_metrics};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 服务的统一入口点。它负责：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志）与 Prometheus recorder
/// 3. 创建基础设施资源（PostgreSQL 连接池）
/// 4. 调用用户提供的闭包构建业务路由
/// 5. 挂载 `/health`、`/ready`、`/metrics` 与请求指标中间件
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use campus_bootstrap::run_http_server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http_server("config", |infra| async move {
///         Ok(my_router(infra.postgres_pool()))
///     }).await
/// }
/// ```
pub async fn run_http_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Arc<Infrastructure>) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器
    let metrics = match MetricsRecorder::new() {
        Ok(recorder) => Some(Arc::new(recorder)),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, /metrics disabled");
            None
        }
    };

    // 4. 创建基础设施（带重试）
    let infra = Arc::new(Infrastructure::from_config(config.clone()).await?);

    // 5. 构建业务路由
    let mut app = router_builder(infra.clone()).await?;

    // 6. 挂载运维端点
    let health_checker = Arc::new(HealthChecker::new().with_postgres(infra.postgres_pool()));
    app = app.merge(health_routes(health_checker));
    if let Some(recorder) = metrics {
        app = app.merge(metrics_routes(recorder));
    }
    let app = app
        .route_layer(middleware::from_fn(track_http_metrics))
        .layer(TraceLayer::new_for_http());

    // 7. 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
