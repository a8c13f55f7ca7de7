//! JSON parsing with path context in error messages.

use serde_json::Value;

/// Parse one JSON document, reporting the JSON path of any failure.
pub fn parse_document(src: &str) -> Result<Value, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, Value>(de)
        .map_err(|err| {
            let path = err.path().to_string();
            format!("at JSON path {} → {}", path, err.into_inner())
        })
}

/// Parse newline-delimited JSON: one document per non-blank line,
/// returned with its 1-based line number.
pub fn parse_ndjson(src: &str) -> Result<Vec<(usize, Value)>, String> {
    let mut docs = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let value = parse_document(line).map_err(|err| format!("line {line_no}: {err}"))?;
        docs.push((line_no, value));
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_documents_and_reports_paths() {
        assert_eq!(parse_document(r#"{"a": [1, 2]}"#).unwrap(), json!({"a": [1, 2]}));
        let err = parse_document(r#"{"a": [1, fals]}"#).unwrap_err();
        assert!(err.contains("a"), "error should carry path context: {err}");
    }

    #[test]
    fn ndjson_skips_blank_lines_and_numbers_documents() {
        let docs = parse_ndjson("{\"a\": 1}\n\n{\"a\": 2}\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0], (1, json!({"a": 1})));
        assert_eq!(docs[1], (3, json!({"a": 2})));
    }
}
