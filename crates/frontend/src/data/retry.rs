use std::future::Future;

use super::source::DataSourceError;
use crate::shared::timing::Timing;

/// Повторы с экспоненциальной задержкой
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_ms: u32,
}

impl RetryPolicy {
    pub const MAX_BACKOFF_MS: u32 = 10_000;

    /// Задержка перед повтором номер `attempt` (с 1)
    pub fn delay_for(&self, attempt: u32) -> u32 {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.backoff_ms
            .saturating_mul(factor)
            .min(Self::MAX_BACKOFF_MS)
    }
}

/// Выполняет `op`, повторяя только retriable-ошибки
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    timing: &dyn Timing,
    mut op: F,
) -> Result<T, DataSourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DataSourceError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retriable() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "⏳ retry {}/{} in {}ms: {}",
                    attempt,
                    policy.max_retries,
                    delay,
                    e
                );
                timing.sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
