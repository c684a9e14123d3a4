use serde::Serialize;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        rows: usize,
    }

    #[test]
    fn format_json_is_minified() {
        let data = TestData {
            name: "charter".into(),
            rows: 3,
        };
        assert_eq!(format_json(&data), "{\"name\":\"charter\",\"rows\":3}");
    }

    #[test]
    fn format_error_escapes_quotes() {
        let msg = "bad \"value\"";
        assert_eq!(
            format_error(&msg),
            "{\"error\":\"bad \\\"value\\\"\"}"
        );
    }
}
