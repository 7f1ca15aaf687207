//! Documentation rows for bound constants.
//!
//! Each row is `(name, value, unit, description)` with the value printed as
//! nine significant digits in `%g` style, so the table reads the same from
//! run to run. [`render_table`] lays rows out as a reStructuredText simple
//! table.

use serde::Serialize;

const VALUE_PRECISION: usize = 9;

const RULE: &str = "========== ============== ================ =========================";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRow {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub description: String,
}

impl DocRow {
    pub fn new(name: &str, value: f64, unit: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            value: format_general(value, VALUE_PRECISION),
            unit: unit.to_string(),
            description: description.to_string(),
        }
    }
}

/// Formats `value` with `precision` significant digits, switching to
/// exponent notation outside `1e-4 ≤ |x| < 10^precision`. Trailing zeros are
/// dropped.
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Renders rows as a fixed-width table with header and closing rule.
pub fn render_table(rows: &[DocRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(RULE.to_string());
    lines.push("   Name        Value            Unit       Description".to_string());
    lines.push(RULE.to_string());
    for row in rows {
        lines.push(format!(
            "{:^10} {:^14} {:^16} {}",
            row.name, row.value, row.unit, row.description
        ));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}
