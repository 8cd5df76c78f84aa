use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of an expense
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense record as returned by `GET /expenses`
///
/// Unknown fields (such as `user_id`) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
}

impl Expense {
    pub fn new(id: i64, title: impl Into<String>, amount: f64) -> Self {
        Expense {
            id: ExpenseId(id),
            title: title.into(),
            amount,
        }
    }
}

/// Request body for create and update
///
/// A NaN amount serializes as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub title: String,
    pub amount: f64,
}

impl ExpensePayload {
    /// Build a payload from the raw draft strings
    pub fn from_draft(title: &str, amount: &str) -> Self {
        ExpensePayload {
            title: title.to_string(),
            amount: parse_float(amount),
        }
    }
}

/// Whether the form creates a new expense or updates an existing one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(ExpenseId),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Creating => "Add Expense",
            FormMode::Editing(_) => "Update",
        }
    }
}

/// Parse the longest numeric prefix of `input`, the way browsers' `parseFloat` does.
///
/// Leading whitespace is skipped, trailing garbage is ignored and an input with no
/// numeric prefix yields NaN.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Format an amount the way it is listed (shortest form, no forced decimals).
///
/// Uses the shortest round-trip digits; magnitudes of 1e21 and above print in
/// full instead of exponent form.
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Total rendered with exactly two decimal places
pub fn format_total(expenses: &[Expense]) -> String {
    to_fixed_2(total(expenses))
}

/// Two-decimal rendering where exact binary ties round away from zero.
/// `{:.2}` alone rounds those ties to even (0.125 -> "0.12").
fn to_fixed_2(x: f64) -> String {
    let scaled = x.abs() * 100.0;
    // The product is exact when the fused residual is zero
    let exact = x.abs().mul_add(100.0, -scaled) == 0.0;
    if !exact || scaled.fract() != 0.5 {
        return format!("{:.2}", x);
    }
    let cents = scaled.floor() as u64 + 1;
    let sign = if x.is_sign_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_two_decimals() {
        let expenses = vec![Expense::new(1, "Lunch", 10.0), Expense::new(2, "Bus", 2.5)];
        assert_eq!(format_total(&expenses), "12.50");
        assert_eq!(format_total(&[]), "0.00");
    }

    #[test]
    fn test_total_ties_round_up() {
        assert_eq!(format_total(&[Expense::new(1, "a", 0.125)]), "0.13");
        assert_eq!(format_total(&[Expense::new(1, "a", 1.125)]), "1.13");
        assert_eq!(format_total(&[Expense::new(1, "a", 0.375)]), "0.38");
        assert_eq!(format_total(&[Expense::new(1, "a", -0.125)]), "-0.13");
        // Not an exact tie in binary, stays below
        assert_eq!(format_total(&[Expense::new(1, "a", 1.005)]), "1.00");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("  7"), 7.0);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("-3.25e2x"), -325.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_nan() {
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float("-.").is_nan());
    }

    #[test]
    fn test_payload_nan_serializes_as_null() {
        let payload = ExpensePayload::from_draft("Coffee", "lots");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Coffee", "amount": null}));
    }

    #[test]
    fn test_expense_ignores_extra_fields() {
        let body = r#"[{"id": 4, "title": "Rent", "amount": 500.0, "user_id": 9}]"#;
        let expenses: Vec<Expense> = serde_json::from_str(body).unwrap();
        assert_eq!(expenses, vec![Expense::new(4, "Rent", 500.0)]);
    }

    #[test]
    fn test_format_amount_matches_list_display() {
        assert_eq!(format_amount(10.0), "10");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_form_mode_labels() {
        assert_eq!(FormMode::Creating.submit_label(), "Add Expense");
        assert_eq!(FormMode::Editing(ExpenseId(3)).submit_label(), "Update");
        assert!(!FormMode::default().is_editing());
    }
}
