//! Фильтры в заголовке колонки: текст, multi-select, min-max

use contracts::views::FilterValue;
use leptos::prelude::*;

use super::api::{ColumnDef, GridApi, HeaderFilterKind};
use super::query::distinct_values;
use super::table_grid::TableGrid;

fn apply(grid: TableGrid, field: &str, value: FilterValue) {
    if let Err(e) = grid.set_header_filter_value(field, value) {
        log::warn!("header filter '{}': {}", field, e);
    }
}

/// Пустая строка = граница не задана
fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn bound_text(bound: Option<f64>) -> String {
    bound.map(|b| b.to_string()).unwrap_or_default()
}

#[component]
pub fn HeaderFilter(grid: TableGrid, column: ColumnDef) -> impl IntoView {
    match column.filter {
        HeaderFilterKind::None => ().into_any(),
        HeaderFilterKind::Text => view! { <TextFilter grid=grid field=column.field /> }.into_any(),
        HeaderFilterKind::MinMax => {
            view! { <MinMaxFilter grid=grid field=column.field /> }.into_any()
        }
        HeaderFilterKind::MultiSelect => {
            view! { <MultiSelectFilter grid=grid field=column.field /> }.into_any()
        }
    }
}

#[component]
fn TextFilter(grid: TableGrid, field: String) -> impl IntoView {
    let field_for_value = field.clone();
    let current = move || match grid.filter_of(&field_for_value) {
        Some(FilterValue::Text(text)) => text,
        _ => String::new(),
    };

    view! {
        <input
            type="text"
            class="stats-filter stats-filter--text"
            placeholder="filter..."
            prop:value=current
            on:input=move |ev| apply(grid, &field, FilterValue::Text(event_target_value(&ev)))
        />
    }
}

#[component]
fn MinMaxFilter(grid: TableGrid, field: String) -> impl IntoView {
    let field_for_value = field.clone();
    let bounds = move || match grid.filter_of(&field_for_value) {
        Some(FilterValue::Range { min, max }) => (min, max),
        _ => (None, None),
    };

    let field_for_min = field.clone();
    let bounds_for_min = bounds.clone();
    let on_min = move |ev| {
        let (_, max) = bounds_for_min();
        let min = parse_bound(&event_target_value(&ev));
        apply(grid, &field_for_min, FilterValue::Range { min, max });
    };
    let field_for_max = field.clone();
    let bounds_for_max = bounds.clone();
    let on_max = move |ev| {
        let (min, _) = bounds_for_max();
        let max = parse_bound(&event_target_value(&ev));
        apply(grid, &field_for_max, FilterValue::Range { min, max });
    };

    view! {
        <div class="stats-filter stats-filter--range">
            <input
                type="number"
                step="any"
                placeholder="min"
                prop:value={
                    let bounds = bounds.clone();
                    move || bound_text(bounds().0)
                }
                on:change=on_min
            />
            <input
                type="number"
                step="any"
                placeholder="max"
                prop:value=move || bound_text(bounds().1)
                on:change=on_max
            />
        </div>
    }
}

#[component]
fn MultiSelectFilter(grid: TableGrid, field: String) -> impl IntoView {
    let field_for_options = field.clone();
    let options = move || grid.records.with(|records| distinct_values(records, &field_for_options));

    let field_for_selected = field.clone();
    let selected = move || match grid.filter_of(&field_for_selected) {
        Some(FilterValue::Values(values)) => values,
        _ => Vec::new(),
    };

    let selected_for_summary = selected.clone();
    let summary = move || {
        let count = selected_for_summary().len();
        if count == 0 {
            "All".to_string()
        } else {
            format!("{} selected", count)
        }
    };

    view! {
        <details class="stats-filter stats-filter--multi">
            <summary>{summary}</summary>
            <div class="stats-filter__options">
                {move || {
                    let chosen = selected();
                    options()
                        .into_iter()
                        .map(|option| {
                            let checked = chosen.contains(&option);
                            let field = field.clone();
                            let value = option.clone();
                            let selected = selected.clone();
                            let on_change = move |_| {
                                let mut values = selected();
                                if let Some(pos) = values.iter().position(|v| v == &value) {
                                    values.remove(pos);
                                } else {
                                    values.push(value.clone());
                                }
                                apply(grid, &field, FilterValue::Values(values));
                            };
                            view! {
                                <label class="stats-filter__option">
                                    <input type="checkbox" prop:checked=checked on:change=on_change />
                                    {option}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </details>
    }
}
