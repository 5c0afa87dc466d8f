//! 启动期连接重试
//!
//! 只用于服务启动时建立基础设施连接，请求处理路径不做重试

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// 指数退避参数
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 最大尝试次数（至少执行一次）
    pub max_attempts: u32,
    /// 首次重试前的等待（毫秒）
    pub initial_delay_ms: u64,
    /// 单次等待上限（毫秒）
    pub max_delay_ms: u64,
    /// 退避乘数
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(5, 1000, 30000)
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            initial_delay_ms,
            max_delay_ms,
            multiplier: 2.0,
        }
    }

    /// 第 `retry` 次重试（从 0 开始）前的等待时间
    fn backoff(&self, retry: u32) -> Duration {
        let scaled = self.initial_delay_ms as f64 * self.multiplier.powi(retry as i32);
        Duration::from_millis((scaled as u64).min(self.max_delay_ms))
    }
}

/// 执行异步操作，失败时按指数退避重试
///
/// 全部尝试失败时返回最后一次的错误
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = config.max_attempts.max(1);
    let mut retry = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retry > 0 {
                    info!(operation = operation_name, attempts = retry + 1, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if retry + 1 >= attempts {
            warn!(operation = operation_name, attempts, error = %error, "Giving up");
            return Err(error);
        }

        let delay = config.backoff(retry);
        warn!(
            operation = operation_name,
            attempt = retry + 1,
            max_attempts = attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
        retry += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast() -> RetryConfig {
        RetryConfig::new(4, 1, 5)
    }

    #[tokio::test]
    async fn test_first_success_is_returned_immediately() {
        let calls = Cell::new(0);
        let pool_size = with_retry(&fast(), "pool", || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>(10u32) }
        })
        .await;

        assert_eq!(pool_size, Ok(10));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_recovers_once_database_comes_up() {
        let calls = Cell::new(0);
        let outcome = with_retry(&fast(), "pool", || {
            calls.set(calls.get() + 1);
            let up = calls.get() >= 3;
            async move {
                if up {
                    Ok("connected")
                } else {
                    Err("connection refused".to_string())
                }
            }
        })
        .await;

        assert_eq!(outcome, Ok("connected"));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_after_max_attempts() {
        let calls = Cell::new(0);
        let outcome: Result<(), String> = with_retry(&fast(), "pool", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err(format!("refused #{n}")) }
        })
        .await;

        assert_eq!(outcome, Err("refused #4".to_string()));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let calls = Cell::new(0);
        let outcome: Result<(), &str> = with_retry(&RetryConfig::new(0, 1, 5), "pool", || {
            calls.set(calls.get() + 1);
            async { Err("refused") }
        })
        .await;

        assert!(outcome.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_backoff_doubles_until_cap() {
        let config = RetryConfig::default();
        let delays: Vec<u64> = (0..6).map(|n| config.backoff(n).as_millis() as u64).collect();

        assert_eq!(delays, [1000, 2000, 4000, 8000, 16000, 30000]);
    }
}
