//! Universal decoder: selects a typed shape from `apiVersion`/`kind`.

use super::object::Workload;
use crate::error::{ExtractError, Result};
use crate::objectkinds::WorkloadKind;
use serde_yaml::Value;

/// Decode raw document bytes into a typed workload.
pub fn decode(doc: &[u8]) -> Result<Workload> {
    let value: Value = serde_yaml::from_slice(doc)?;
    decode_value(value)
}

/// Decode an already-parsed document into a typed workload.
///
/// A kind outside the recognized set is reported as
/// [`ExtractError::UnsupportedKind`]; every other problem (missing type
/// fields, an unregistered group version, mistyped fields) is a decode error.
pub fn decode_value(value: Value) -> Result<Workload> {
    if !value.is_mapping() {
        return Err(ExtractError::Decode(format!(
            "expected a mapping at the document root, found {}",
            describe(&value)
        )));
    }

    let kind = string_field(&value, "kind")?
        .ok_or_else(|| ExtractError::Decode("Object 'Kind' is missing".to_string()))?;
    let api_version = string_field(&value, "apiVersion")?
        .ok_or_else(|| ExtractError::Decode("Object 'apiVersion' is missing".to_string()))?;

    let workload_kind =
        WorkloadKind::from_kind(kind).ok_or_else(|| ExtractError::UnsupportedKind(kind.to_string()))?;
    if !workload_kind.accepts_api_version(api_version) {
        return Err(ExtractError::Decode(format!(
            "no kind \"{}\" is registered for version \"{}\"",
            kind, api_version
        )));
    }

    Ok(serde_yaml::from_value(value)?)
}

/// Read the `kind` of a generic document without validating anything else.
pub fn peek_kind(value: &Value) -> Option<&str> {
    value.get("kind")?.as_str()
}

fn string_field<'a>(value: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ExtractError::Decode(format!(
            "{} must be a string, found {}",
            key,
            describe(other)
        ))),
    }
}

/// Human-readable name of a YAML value's type.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "struct",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pod() {
        let yaml = b"apiVersion: v1\nkind: Pod\nspec:\n  containers:\n  - name: c\n    image: i\n";
        let workload = decode(yaml).unwrap();
        assert_eq!(workload.kind(), WorkloadKind::Pod);
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let err = decode(b"apiVersion: v1\nkind: Service\nspec: {}\n").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedKind(k) if k == "Service"));
    }

    #[test]
    fn test_missing_type_fields() {
        assert!(matches!(
            decode(b"apiVersion: v1\nspec: {}\n"),
            Err(ExtractError::Decode(_))
        ));
        assert!(matches!(
            decode(b"kind: Pod\nspec: {}\n"),
            Err(ExtractError::Decode(_))
        ));
    }

    #[test]
    fn test_unregistered_version() {
        let err = decode(b"apiVersion: v1\nkind: Deployment\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error decoding document: no kind \"Deployment\" is registered for version \"v1\""
        );
    }

    #[test]
    fn test_non_mapping_root() {
        assert!(matches!(decode(b"- a\n- b\n"), Err(ExtractError::Decode(_))));
        assert!(matches!(decode(b"key: [unclosed\n"), Err(ExtractError::Decode(_))));
    }

    #[test]
    fn test_peek_kind() {
        let value: Value = serde_yaml::from_str("kind: List\nitems: []\n").unwrap();
        assert_eq!(peek_kind(&value), Some("List"));
        let value: Value = serde_yaml::from_str("kind: 3\n").unwrap();
        assert_eq!(peek_kind(&value), None);
    }
}
