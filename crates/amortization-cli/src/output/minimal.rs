use serde_json::Value;

use super::format_cell;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 4] = [
    "interest_savings",
    "monthly_payment",
    "total_interest_standard",
    "months_saved",
];

/// Print just the key answer value from the output.
///
/// Looks through the result (and one level of nested objects, where the
/// comparison lives in full schedule output) for the priority fields, then
/// falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match find_answer(result_obj) {
        Some(answer) => println!("{}", answer),
        None => println!("{}", format_cell(result_obj)),
    }
}

fn find_answer(result: &Value) -> Option<String> {
    let Value::Object(map) = result else {
        return None;
    };

    let nested = map.values().filter(|v| v.is_object());
    for scope in std::iter::once(result).chain(nested) {
        for key in PRIORITY_KEYS {
            if let Some(val) = scope.get(key).filter(|v| !v.is_null()) {
                return Some(format_cell(val));
            }
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_cell(val)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_savings_found_in_nested_comparison() {
        let result = json!({
            "accelerated_schedule": [],
            "comparison": {"interest_savings": "19000.12", "monthly_payment": "536.82"},
        });
        assert_eq!(find_answer(&result).as_deref(), Some("19000.12"));
    }

    #[test]
    fn test_payment_at_top_level() {
        let result = json!({"monthly_payment": "536.82", "periods": 360});
        assert_eq!(find_answer(&result).as_deref(), Some("536.82"));
    }

    #[test]
    fn test_fallback_to_first_field() {
        let result = json!({"alpha": 1});
        assert_eq!(find_answer(&result).as_deref(), Some("alpha: 1"));
    }
}
