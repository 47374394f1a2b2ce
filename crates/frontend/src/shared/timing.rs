//! Источник времени и таймеров.
//!
//! Координатор и контроллеры ждут только через этот trait, поэтому в тестах
//! задержки подменяются без реального `setTimeout`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait(?Send)]
pub trait Timing {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, ms: u32);
}

/// Браузерная реализация: `setTimeout` через gloo-timers
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTiming;

#[async_trait(?Send)]
impl Timing for BrowserTiming {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
