//! 服务运行时

use campus_config::AppConfig;
use campus_telemetry::{LogFormat, init_tracing};
use tracing::{error, info, warn};

/// 初始化服务运行时（日志）
pub fn init_runtime(config: &AppConfig) {
    // 生产环境输出 JSON
    let format = if config.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = init_tracing(&config.telemetry.log_level, format) {
        warn!(error = %e, "Tracing subscriber already installed");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        ?format,
        "Runtime initialized"
    );
}

/// 等待 Ctrl+C 或 SIGTERM
///
/// 信号处理器安装失败时只记录错误，不会触发关闭
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
