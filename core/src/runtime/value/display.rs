use std::fmt;

use super::JsValue;

/// Primitive `ToString`. Objects print their generic tag; the context-aware
/// conversion that runs `toString` lives on `Context`.
impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => f.write_str("undefined"),
            JsValue::Null => f.write_str("null"),
            JsValue::Boolean(b) => write!(f, "{b}"),
            JsValue::Number(n) => fmt_number(*n, f),
            JsValue::String(s) => f.write_str(s),
            JsValue::Object(_) => f.write_str("[object Object]"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // Covers -0.
        f.write_str("0")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::JsValue;

    #[test]
    fn numbers_follow_script_conventions() {
        assert_eq!(JsValue::Number(3.0).to_string(), "3");
        assert_eq!(JsValue::Number(-0.0).to_string(), "0");
        assert_eq!(JsValue::Number(0.5).to_string(), "0.5");
        assert_eq!(JsValue::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(JsValue::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }
}
