//! REST-клиент hosted backend (PostgREST/Supabase).
//!
//! Строки читаются страницами через заголовок `Range`; retriable-ошибки
//! повторяются по [`RetryPolicy`].

use async_trait::async_trait;
use contracts::views::StatRow;
use gloo_net::http::Request;
use std::future::Future;
use std::rc::Rc;

use super::retry::{with_retry, RetryPolicy};
use super::source::{DataSource, DataSourceError, RowQuery};
use crate::shared::config::BackendConfig;
use crate::shared::timing::Timing;

pub struct RestDataSource {
    base_url: String,
    anon_key: String,
    page_size: u32,
    policy: RetryPolicy,
    timing: Rc<dyn Timing>,
}

impl RestDataSource {
    pub fn new(config: &BackendConfig, timing: Rc<dyn Timing>) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            page_size: config.page_size.max(1),
            policy: RetryPolicy {
                max_retries: config.max_retries,
                backoff_ms: config.backoff_ms,
            },
            timing,
        }
    }

    async fn fetch_page(&self, url: &str, from: u32) -> Result<Vec<StatRow>, DataSourceError> {
        let to = from + self.page_size - 1;
        let response = Request::get(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .header("Range-Unit", "items")
            .header("Range", &format!("{}-{}", from, to))
            .send()
            .await
            .map_err(|e| DataSourceError::Retriable(format!("Request failed: {}", e)))?;

        match page_status(response.status()) {
            PageStatus::PastEnd => Ok(Vec::new()),
            PageStatus::Failed => {
                let body = response.text().await.unwrap_or_default();
                Err(DataSourceError::from_status(response.status(), &body))
            }
            PageStatus::Rows => response
                .json::<Vec<StatRow>>()
                .await
                .map_err(|e| DataSourceError::Fatal(format!("Failed to parse response: {}", e))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageStatus {
    Rows,
    /// 416: запрошенный диапазон за концом таблицы
    PastEnd,
    Failed,
}

fn page_status(status: u16) -> PageStatus {
    match status {
        416 => PageStatus::PastEnd,
        200..=299 => PageStatus::Rows,
        _ => PageStatus::Failed,
    }
}

/// Читает все страницы по `page_size` строк, начиная с 0.
///
/// Короткая (или пустая) страница означает конец данных. Каждая страница
/// повторяется по `policy` независимо от остальных.
pub async fn fetch_all_pages<F, Fut>(
    page_size: u32,
    policy: RetryPolicy,
    timing: &dyn Timing,
    mut fetch_page: F,
) -> Result<Vec<StatRow>, DataSourceError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<StatRow>, DataSourceError>>,
{
    let page_size = page_size.max(1);
    let mut rows = Vec::new();
    let mut from = 0u32;

    loop {
        let page = with_retry(policy, timing, || fetch_page(from)).await?;
        let received = page.len() as u32;
        rows.extend(page);

        if received < page_size {
            return Ok(rows);
        }
        from += received;
    }
}

/// URL выборки: `{base}/rest/v1/{table}?select=...&order=...`
pub fn build_query_url(base_url: &str, query: &RowQuery) -> String {
    let select = if query.select.is_empty() {
        "*".to_string()
    } else {
        query
            .select
            .iter()
            .map(|column| format!("\"{}\"", column))
            .collect::<Vec<_>>()
            .join(",")
    };

    let mut url = format!(
        "{}/rest/v1/{}?select={}",
        base_url,
        urlencoding::encode(&query.table),
        urlencoding::encode(&select)
    );
    if let Some(order) = &query.order {
        url.push_str(&format!("&order={}", urlencoding::encode(order)));
    }
    url
}

#[async_trait(?Send)]
impl DataSource for RestDataSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<StatRow>, DataSourceError> {
        let url = build_query_url(&self.base_url, query);
        let rows = fetch_all_pages(self.page_size, self.policy, self.timing.as_ref(), |from| {
            self.fetch_page(&url, from)
        })
        .await?;

        log::debug!("📥 {}: {} rows", query.table, rows.len());
        Ok(rows)
    }
}
