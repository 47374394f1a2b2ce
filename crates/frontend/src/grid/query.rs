//! Фильтрация и сортировка строк грида. Чистые функции, без сигналов.

use contracts::views::{FilterRule, FilterValue, SortDirection, SortRule, StatRow};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::api::GridRecord;

/// Проходит ли строка один фильтр
pub fn matches_filter(row: &StatRow, filter: &FilterValue, field: &str) -> bool {
    match filter {
        FilterValue::Text(needle) => {
            let needle = needle.trim().to_lowercase();
            if needle.is_empty() {
                return true;
            }
            row.text(field)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        }
        FilterValue::Values(values) => {
            if values.is_empty() {
                return true;
            }
            match row.text(field) {
                Some(value) => values.iter().any(|v| v == &value),
                None => false,
            }
        }
        FilterValue::Range { min, max } => {
            if min.is_none() && max.is_none() {
                return true;
            }
            let Some(value) = row.number(field) else {
                return false;
            };
            min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
        }
    }
}

pub fn matches_all(row: &StatRow, filters: &[FilterRule]) -> bool {
    filters
        .iter()
        .all(|rule| matches_filter(row, &rule.value, &rule.field))
}

/// Сравнение значений одной колонки: числа численно, строки без учёта
/// регистра, пустые значения всегда в конце (в обоих направлениях).
fn compare_field(a: &StatRow, b: &StatRow, field: &str, direction: SortDirection) -> Ordering {
    let ordered = |ord: Ordering| match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };

    if let (Some(x), Some(y)) = (a.number(field), b.number(field)) {
        return ordered(x.partial_cmp(&y).unwrap_or(Ordering::Equal));
    }

    match (a.text(field), b.text(field)) {
        (Some(x), Some(y)) => ordered(x.to_lowercase().cmp(&y.to_lowercase())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Стабильная сортировка по списку правил (первое правило главное)
pub fn sort_records(records: &mut [GridRecord], rules: &[SortRule]) {
    if rules.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for rule in rules {
            let ord = compare_field(&a.data, &b.data, &rule.field, rule.direction);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

/// Строки в порядке отображения
pub fn visible_records(
    records: &[GridRecord],
    filters: &[FilterRule],
    sort: &[SortRule],
) -> Vec<GridRecord> {
    let mut visible: Vec<GridRecord> = records
        .iter()
        .filter(|record| matches_all(&record.data, filters))
        .cloned()
        .collect();
    sort_records(&mut visible, sort);
    visible
}

/// Уникальные значения колонки для multi-select фильтра
pub fn distinct_values(records: &[GridRecord], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.data.text(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Клик по заголовку: asc → desc → без сортировки
pub fn next_sort(current: &[SortRule], field: &str) -> Vec<SortRule> {
    match current.first() {
        Some(rule) if rule.field == field => match rule.direction {
            SortDirection::Asc => vec![SortRule::desc(field)],
            SortDirection::Desc => Vec::new(),
        },
        _ => vec![SortRule::asc(field)],
    }
}

/// Индикатор сортировки для заголовка
pub fn sort_indicator(current: &[SortRule], field: &str) -> &'static str {
    match current.first() {
        Some(rule) if rule.field == field => match rule.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::views::RowIdentity;

    fn record(name: &str, team: &str, line: f64) -> GridRecord {
        GridRecord {
            identity: RowIdentity::new(format!("{name}_{team}")),
            data: StatRow::new()
                .with("Player Name", name)
                .with("Team", team)
                .with("Line", line),
        }
    }

    fn sample() -> Vec<GridRecord> {
        vec![
            record("jones", "LAL", 24.5),
            record("Adams", "BOS", 8.5),
            record("Brown", "LAL", 17.5),
        ]
    }

    fn names(records: &[GridRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.data.text("Player Name").unwrap())
            .collect()
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let filters = vec![FilterRule::new("Player Name", FilterValue::Text("JON".into()))];
        let visible = visible_records(&sample(), &filters, &[]);
        assert_eq!(names(&visible), vec!["jones"]);
    }

    #[test]
    fn test_multi_select_and_range() {
        let filters = vec![
            FilterRule::new("Team", FilterValue::Values(vec!["LAL".into()])),
            FilterRule::new(
                "Line",
                FilterValue::Range {
                    min: Some(10.0),
                    max: Some(20.0),
                },
            ),
        ];
        let visible = visible_records(&sample(), &filters, &[]);
        assert_eq!(names(&visible), vec!["Brown"]);
    }

    #[test]
    fn test_range_excludes_missing_numbers() {
        let mut records = sample();
        records.push(GridRecord {
            identity: RowIdentity::from("x"),
            data: StatRow::new().with("Player Name", "NoLine"),
        });
        let filters = vec![FilterRule::new(
            "Line",
            FilterValue::Range {
                min: None,
                max: Some(100.0),
            },
        )];
        assert_eq!(visible_records(&records, &filters, &[]).len(), 3);
    }

    #[test]
    fn test_sort_strings_case_insensitive_and_numbers() {
        let visible = visible_records(&sample(), &[], &[SortRule::asc("Player Name")]);
        assert_eq!(names(&visible), vec!["Adams", "Brown", "jones"]);

        let visible = visible_records(&sample(), &[], &[SortRule::desc("Line")]);
        assert_eq!(names(&visible), vec!["jones", "Brown", "Adams"]);
    }

    #[test]
    fn test_sort_secondary_rule_and_missing_last() {
        let mut records = sample();
        records.push(GridRecord {
            identity: RowIdentity::from("x"),
            data: StatRow::new().with("Player Name", "Zed"),
        });
        let rules = vec![SortRule::desc("Team"), SortRule::asc("Line")];
        let visible = visible_records(&records, &[], &rules);
        assert_eq!(names(&visible), vec!["Brown", "jones", "Adams", "Zed"]);
    }

    #[test]
    fn test_next_sort_cycle() {
        let first = next_sort(&[], "Line");
        assert_eq!(first, vec![SortRule::asc("Line")]);
        let second = next_sort(&first, "Line");
        assert_eq!(second, vec![SortRule::desc("Line")]);
        assert!(next_sort(&second, "Line").is_empty());
        assert_eq!(next_sort(&second, "Team"), vec![SortRule::asc("Team")]);
        assert_eq!(sort_indicator(&first, "Line"), " ▲");
        assert_eq!(sort_indicator(&first, "Team"), " ⇅");
    }

    #[test]
    fn test_distinct_values_sorted() {
        assert_eq!(distinct_values(&sample(), "Team"), vec!["BOS", "LAL"]);
    }
}
