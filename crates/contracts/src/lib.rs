//! Общие DTO между частями statsboard: состояние табов, строки таблиц,
//! отладочные снимки.

pub mod views;
