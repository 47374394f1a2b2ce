use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Строка таблицы статистики в том виде, в каком её отдаёт backend:
/// JSON-объект с произвольным набором колонок.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatRow(pub Map<String, Value>);

impl StatRow {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-хелпер, удобен для тестов и фикстур
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Значение поля как строка. Числа и bool приводятся к тексту,
    /// null и отсутствующее поле дают `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Значение поля как число. Строки вида "0.65" тоже парсятся:
    /// некоторые таблицы хранят числа текстом.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Стабильный ключ строки. У данных нет первичного ключа, поэтому он
/// собирается из подмножества полей (имя + команда + категория + сегмент).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowIdentity(pub String);

impl RowIdentity {
    pub const SEPARATOR: char = '_';

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Склеивает значения `key_fields` через `_`. Отсутствующее поле даёт
    /// пустой сегмент, чтобы позиции полей в ключе не съезжали.
    pub fn from_fields<S: AsRef<str>>(row: &StatRow, key_fields: &[S]) -> Self {
        let parts: Vec<String> = key_fields
            .iter()
            .map(|field| row.text(field.as_ref()).unwrap_or_default())
            .collect();
        Self(parts.join(&Self::SEPARATOR.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
