//! Эвристики ширины колонок.
//!
//! - cluster equalization: группа связанных колонок (over/under odds)
//!   получает общую ширину, равную максимальной естественной в группе;
//! - fill: одна колонка забирает остаток ширины контейнера.

use crate::grid::api::ColumnInfo;

/// Примерная ширина символа и отступы ячейки, px
const CHAR_WIDTH_PX: f64 = 7.5;
const CELL_PADDING_PX: f64 = 24.0;
/// Запас под индикатор сортировки в заголовке
const HEADER_EXTRA_PX: f64 = 16.0;

/// Естественная ширина колонки по заголовку и самому длинному значению
pub fn natural_width<'a>(
    title: &str,
    values: impl IntoIterator<Item = &'a str>,
    min_width: f64,
) -> f64 {
    let title_px = title.chars().count() as f64 * CHAR_WIDTH_PX + HEADER_EXTRA_PX;
    let longest = values
        .into_iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0);
    let content_px = longest as f64 * CHAR_WIDTH_PX;
    (title_px.max(content_px) + CELL_PADDING_PX)
        .max(min_width)
        .ceil()
}

/// Ширины для каждой группы. Колонки, которых нет в гриде, пропускаются.
pub fn equalize_clusters(columns: &[ColumnInfo], clusters: &[Vec<String>]) -> Vec<(String, f64)> {
    let mut assignments = Vec::new();

    for cluster in clusters {
        let members: Vec<&ColumnInfo> = cluster
            .iter()
            .filter_map(|field| columns.iter().find(|c| &c.field == field))
            .collect();
        if members.len() < 2 {
            continue;
        }

        let shared = members
            .iter()
            .map(|c| c.natural_width)
            .fold(0.0_f64, f64::max);
        for column in members {
            assignments.push((column.field.clone(), shared));
        }
    }

    assignments
}

/// Ширина fill-колонки: остаток контейнера, но не меньше естественной.
/// `None`, если колонки нет или контейнер ещё не измерен.
pub fn fill_width(columns: &[ColumnInfo], fill_field: &str, container_width: f64) -> Option<f64> {
    if container_width <= 0.0 {
        return None;
    }
    let fill = columns.iter().find(|c| c.field == fill_field)?;
    let others: f64 = columns
        .iter()
        .filter(|c| c.field != fill_field)
        .map(|c| c.width)
        .sum();

    Some((container_width - others).max(fill.natural_width).floor())
}
