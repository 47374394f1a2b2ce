//! Компонент отрисовки [`TableGrid`]: заголовки с сортировкой, строка
//! фильтров, строки данных и детальные панели раскрытых строк.

use contracts::views::StatRow;
use leptos::prelude::*;

use super::api::{ColumnDef, GridApi, GridEvent, GridRecord};
use super::format::format_cell;
use super::header_filter::HeaderFilter;
use super::query::{next_sort, sort_indicator};
use super::table_grid::TableGrid;

fn width_style(width: Option<f64>) -> String {
    match width {
        Some(w) => format!("width: {w}px; min-width: {w}px; max-width: {w}px;"),
        None => String::new(),
    }
}

#[component]
fn SortableHeader(grid: TableGrid, column: ColumnDef) -> impl IntoView {
    let field = column.field.clone();
    let field_for_click = field.clone();
    let field_for_width = field.clone();
    let align = column.align;

    let handle_click = move |_| {
        let rules = next_sort(&grid.sort.get_untracked(), &field_for_click);
        if let Err(e) = grid.set_sort(&rules) {
            log::warn!("sort on '{}': {}", field_for_click, e);
        }
    };

    view! {
        <th
            class="stats-grid__header"
            style=move || {
                format!(
                    "text-align: {}; {}",
                    align.as_css(),
                    width_style(grid.width_of(&field_for_width)),
                )
            }
            on:click=handle_click
        >
            {column.title.clone()}
            <span class="stats-grid__sort">
                {move || grid.sort.with(|sort| sort_indicator(sort, &field))}
            </span>
        </th>
    }
}

#[component]
fn DetailPanel(data: StatRow, colspan: usize) -> impl IntoView {
    let fields: Vec<(String, String)> = data
        .fields()
        .map(|(name, value)| {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => "-".to_string(),
                other => other.to_string(),
            };
            (name.clone(), text)
        })
        .collect();

    view! {
        <tr class="stats-grid__detail">
            <td colspan=colspan.to_string()>
                <dl class="stats-grid__detail-list">
                    {fields
                        .into_iter()
                        .map(|(name, text)| {
                            view! {
                                <div class="stats-grid__detail-item">
                                    <dt>{name}</dt>
                                    <dd>{text}</dd>
                                </div>
                            }
                        })
                        .collect_view()}
                </dl>
            </td>
        </tr>
    }
}

/// Строка таблицы. Создаётся один раз на ключ; раскрытие меняет только
/// маркер, класс и детальную панель под строкой.
#[component]
fn StatsRow(
    grid: TableGrid,
    record: GridRecord,
    columns: Vec<ColumnDef>,
    expand_field: Option<String>,
) -> impl IntoView {
    let colspan = columns.len();
    let identity = record.identity.clone();
    let expanded = Signal::derive(move || grid.is_expanded(&identity));

    let cells = columns
        .into_iter()
        .map(|column| {
            let is_expander = expand_field.as_deref() == Some(column.field.as_str());
            let text = format_cell(record.data.get(&column.field), column.format);
            let identity = record.identity.clone();
            let field = column.field.clone();
            let on_click = move |_| {
                grid.emit(GridEvent::CellClicked {
                    field: field.clone(),
                    identity: identity.clone(),
                });
            };
            let marker = move || match (is_expander, expanded.get()) {
                (false, _) => "",
                (true, true) => "▾ ",
                (true, false) => "▸ ",
            };

            view! {
                <td
                    class="stats-grid__cell"
                    class:stats-grid__cell--expander=is_expander
                    style=format!("text-align: {};", column.align.as_css())
                    on:click=on_click
                >
                    {marker}
                    {text}
                </td>
            }
        })
        .collect_view();

    let data = record.data;
    let detail = move || {
        expanded
            .get()
            .then(|| view! { <DetailPanel data=data.clone() colspan=colspan /> })
    };

    view! {
        <tr class="stats-grid__row" class:stats-grid__row--expanded=move || expanded.get()>
            {cells}
        </tr>
        {detail}
    }
}

#[component]
pub fn StatsTable(grid: TableGrid) -> impl IntoView {
    let rows = Memo::new(move |_| grid.visible_rows());
    let columns = move || {
        grid.config
            .with(|config| config.as_ref().map(|c| c.columns.clone()).unwrap_or_default())
    };
    let expand_field =
        move || grid.config.with(|config| config.as_ref().and_then(|c| c.expand_field.clone()));
    let placeholder = move || {
        grid.placeholder.get().unwrap_or_else(|| {
            grid.config
                .with(|config| config.as_ref().map(|c| c.placeholder.clone()))
                .unwrap_or_default()
        })
    };
    let placeholder_row = move || {
        rows.with(|rows| rows.is_empty()).then(|| {
            let colspan = grid
                .config
                .with(|config| config.as_ref().map(|c| c.columns.len()).unwrap_or(0))
                .max(1);
            view! {
                <tr class="stats-grid__placeholder">
                    <td colspan=colspan.to_string()>{placeholder}</td>
                </tr>
            }
        })
    };

    view! {
        <div class="stats-grid" node_ref=grid.scroll_ref>
            <table class="stats-grid__table">
                <thead>
                    <tr class="stats-grid__titles">
                        {move || {
                            columns()
                                .into_iter()
                                .map(|column| view! { <SortableHeader grid=grid column=column /> })
                                .collect_view()
                        }}
                    </tr>
                    <tr class="stats-grid__filters">
                        {move || {
                            columns()
                                .into_iter()
                                .map(|column| {
                                    view! {
                                        <th class="stats-grid__filter-cell">
                                            <HeaderFilter grid=grid column=column />
                                        </th>
                                    }
                                })
                                .collect_view()
                        }}
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row}
                    // колонки меняются только при build, строки ключуются
                    // по identity и версии данных
                    {move || {
                        let columns = columns();
                        let expand_field = expand_field();
                        view! {
                            <For
                                each=move || {
                                    let version = grid.data_version.get();
                                    rows.get()
                                        .into_iter()
                                        .map(|record| (version, record))
                                        .collect::<Vec<_>>()
                                }
                                key=|(version, record): &(u64, GridRecord)| (*version, record.identity.clone())
                                children=move |(_, record)| {
                                    view! {
                                        <StatsRow
                                            grid=grid
                                            record=record
                                            columns=columns.clone()
                                            expand_field=expand_field.clone()
                                        />
                                    }
                                }
                            />
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}
