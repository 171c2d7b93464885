// crt.sh Entry Parser
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Extracts the fields the normalizer needs from one element of a crt.sh
// JSON response

use super::Result;
use crate::error::NormalizeError;
use serde_json::{Map, Value};

/// One certificate entry of a crt.sh search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrtShEntry {
    /// crt.sh certificate id, informational only
    pub id: Option<i64>,
    /// Subject common name as logged
    pub common_name: String,
    /// Newline separated subject alternative names
    pub name_value: String,
    /// Issuer distinguished name
    pub issuer_name: String,
    /// Start of validity, verbatim
    pub not_before: String,
    /// End of validity, verbatim
    pub not_after: String,
    /// Serial number as hex
    pub serial_number: String,
}

impl CrtShEntry {
    /// Extract an entry from a JSON value at position `index` of the payload
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            NormalizeError::input_format(format!(
                "entry {} is {}, expected an object",
                index,
                json_type_name(value)
            ))
        })?;

        let location = format!("entry {}", index);

        Ok(Self {
            id: object.get("id").and_then(Value::as_i64),
            common_name: string_field(object, "common_name", &location)?,
            name_value: string_field(object, "name_value", &location)?,
            issuer_name: string_field(object, "issuer_name", &location)?,
            not_before: string_field(object, "not_before", &location)?,
            not_after: string_field(object, "not_after", &location)?,
            serial_number: string_field(object, "serial_number", &location)?,
        })
    }

    /// Lower-cased subject alternative names, one per line of `name_value`
    pub fn names(&self) -> Vec<String> {
        let lowered = self.name_value.to_lowercase();
        split_lines(&lowered).into_iter().map(str::to_string).collect()
    }

    /// Normalized subject, see [`normalize_common_name`]
    pub fn subject(&self) -> String {
        normalize_common_name(&self.common_name)
    }

    /// Serial number in upper case
    pub fn pk_number(&self) -> String {
        self.serial_number.to_uppercase()
    }
}

fn string_field(object: &Map<String, Value>, field: &str, location: &str) -> Result<String> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(NormalizeError::InvalidField {
            field: field.to_string(),
            location: location.to_string(),
            expected: "a string",
        }),
        None => Err(NormalizeError::missing_field(field, location)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lower-case a common name and strip any leading `.` and `*` characters
///
/// `*.example.com` and `.example.com` both become `example.com`.
pub fn normalize_common_name(common_name: &str) -> String {
    common_name
        .to_lowercase()
        .trim_start_matches(['.', '*'])
        .to_string()
}

/// Strip leading and trailing dots from the requested hostname
///
/// Case is left untouched.
pub fn normalize_hostname(hostname: &str) -> &str {
    hostname.trim_matches('.')
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text on universal newlines
///
/// `\r\n` counts as one boundary, a trailing boundary does not produce an
/// empty last line, and empty input yields no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..pos]);
        start = pos + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "issuer_ca_id": 183267,
            "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
            "common_name": "*.Example.com",
            "name_value": "*.example.com\nexample.com",
            "id": 8751474621i64,
            "entry_timestamp": "2023-02-13T10:12:33.6",
            "not_before": "2023-02-13T09:12:33",
            "not_after": "2023-05-14T09:12:32",
            "serial_number": "04ab0c1d",
            "result_count": 3
        })
    }

    #[test]
    fn test_from_value() {
        let entry = CrtShEntry::from_value(0, &sample()).unwrap();
        assert_eq!(entry.id, Some(8751474621));
        assert_eq!(entry.common_name, "*.Example.com");
        assert_eq!(entry.subject(), "example.com");
        assert_eq!(entry.pk_number(), "04AB0C1D");
        assert_eq!(entry.names(), vec!["*.example.com", "example.com"]);
    }

    #[test]
    fn test_entry_without_id() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("id");
        let entry = CrtShEntry::from_value(0, &value).unwrap();
        assert_eq!(entry.id, None);
        assert_eq!(entry.pk_number(), "04AB0C1D");
    }

    #[test]
    fn test_missing_field_reports_first_absent_key() {
        let mut value = sample();
        let object = value.as_object_mut().unwrap();
        object.remove("issuer_name");
        object.remove("serial_number");

        let err = CrtShEntry::from_value(4, &value).unwrap_err();
        match err {
            NormalizeError::MissingField { field, location } => {
                assert_eq!(field, "issuer_name");
                assert_eq!(location, "entry 4");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_string_field_is_invalid() {
        let mut value = sample();
        value["serial_number"] = json!(1234);
        let err = CrtShEntry::from_value(0, &value).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidField { ref field, .. } if field == "serial_number"
        ));
    }

    #[test]
    fn test_non_object_entry_is_input_format_error() {
        let err = CrtShEntry::from_value(2, &json!("example.com")).unwrap_err();
        assert!(matches!(err, NormalizeError::InputFormat { .. }));
        assert!(err.to_string().contains("entry 2 is a string"));
    }

    #[test]
    fn test_normalize_common_name() {
        assert_eq!(normalize_common_name("*.Example.COM"), "example.com");
        assert_eq!(normalize_common_name(".example.com"), "example.com");
        assert_eq!(normalize_common_name("*.*..example.com"), "example.com");
        assert_eq!(normalize_common_name("www.example.com."), "www.example.com.");
    }

    #[test]
    fn test_normalize_hostname() {
        assert_eq!(normalize_hostname(".example.com."), "example.com");
        assert_eq!(normalize_hostname("..Example.com"), "Example.com");
        assert_eq!(normalize_hostname("..."), "");
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\u{2028}b\u{0b}c"), vec!["a", "b", "c"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }
}
