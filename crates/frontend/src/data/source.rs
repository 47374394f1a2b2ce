use async_trait::async_trait;
use contracts::views::StatRow;
use thiserror::Error;

/// Запрос строк одной таблицы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    /// Имя таблицы/представления на стороне backend
    pub table: String,
    /// Колонки для `select`, пусто = все
    pub select: Vec<String>,
    /// Серверная сортировка, например "Player Name.asc"
    pub order: Option<String>,
}

impl RowQuery {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: Vec::new(),
            order: None,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataSourceError {
    /// Сеть, 5xx, 429: имеет смысл повторить
    #[error("retriable data source error: {0}")]
    Retriable(String),
    /// 4xx, битый JSON и т.п.
    #[error("data source error: {0}")]
    Fatal(String),
}

impl DataSourceError {
    pub fn is_retriable(&self) -> bool {
        matches!(self, DataSourceError::Retriable(_))
    }

    /// Классификация HTTP-статуса ответа
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {}: {}", status, body);
        if status >= 500 || status == 429 || status == 408 {
            DataSourceError::Retriable(message)
        } else {
            DataSourceError::Fatal(message)
        }
    }
}

/// Источник строк для таба. Повторы запросов делает сама реализация.
#[async_trait(?Send)]
pub trait DataSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<StatRow>, DataSourceError>;
}
