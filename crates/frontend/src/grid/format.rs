//! Форматирование значений ячеек

use serde_json::Value;

use super::api::CellFormat;

/// Форматирует число с разделителем тысяч (запятая) и указанным количеством знаков
///
/// # Примеры
///
/// ```
/// use statsboard::grid::format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", decimals as usize, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Вставляем разделитель каждые 3 цифры с конца целой части
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{sign}{grouped}.{d}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Американский коэффициент: положительные со знаком «+»
pub fn format_american_odds(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded > 0 {
        format!("+{rounded}")
    } else {
        rounded.to_string()
    }
}

/// Доля (0.65) или процент (65) в строку "65.0%"
pub fn format_percent(value: f64) -> String {
    let pct = if value.abs() <= 1.0 { value * 100.0 } else { value };
    format!("{:.1}%", pct)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Текст ячейки. Нечисловое значение в числовой колонке выводится как есть.
pub fn format_cell(value: Option<&Value>, format: CellFormat) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value.is_null() {
        return String::new();
    }

    let number = as_number(value);
    match (format, number) {
        (CellFormat::Integer, Some(n)) => format_number_with_decimals(n, 0),
        (CellFormat::Decimal(d), Some(n)) => format_number_with_decimals(n, d),
        (CellFormat::Percent, Some(n)) => format_percent(n),
        (CellFormat::AmericanOdds, Some(n)) => format_american_odds(n),
        _ => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
