use contracts::views::ViewId;

use crate::data::source::RowQuery;
use crate::grid::api::{ColumnDef, GridConfig};

/// Описание одного таба: откуда данные, какие колонки, как считать ключ
/// строки и как подгонять ширины.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    pub id: ViewId,
    pub label: String,
    pub table: String,
    pub columns: Vec<ColumnDef>,
    /// Поля, из которых собирается RowIdentity
    pub key_fields: Vec<String>,
    pub expand_field: Option<String>,
    /// Группы колонок с общей шириной
    pub clusters: Vec<Vec<String>>,
    pub fill_field: Option<String>,
    pub placeholder: String,
}

impl ViewDefinition {
    pub fn new(id: &str, label: &str, table: &str) -> Self {
        Self {
            id: ViewId::new(id),
            label: label.to_string(),
            table: table.to_string(),
            columns: Vec::new(),
            key_fields: Vec::new(),
            expand_field: None,
            clusters: Vec::new(),
            fill_field: None,
            placeholder: "No data".to_string(),
        }
    }

    pub fn columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    pub fn key_fields(mut self, fields: &[&str]) -> Self {
        self.key_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn expand_on(mut self, field: &str) -> Self {
        self.expand_field = Some(field.to_string());
        self
    }

    pub fn cluster(mut self, fields: &[&str]) -> Self {
        self.clusters
            .push(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn fill(mut self, field: &str) -> Self {
        self.fill_field = Some(field.to_string());
        self
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            columns: self.columns.clone(),
            expand_field: self.expand_field.clone(),
            placeholder: self.placeholder.clone(),
        }
    }

    pub fn query(&self) -> RowQuery {
        RowQuery::table(&self.table)
    }
}
