//! Unwrapping `List` documents.
//!
//! Each item of a `List` is an embedded workload document. Supported items
//! are re-serialized and run through the same strategy chain as top-level
//! documents. Unwrapping goes exactly one level deep: an item that is itself
//! a `List` is unsupported.

use crate::error::{ExtractError, Result};
use crate::extract::StrategyChain;
use crate::objectkinds::KindTable;
use crate::pipeline::Mode;
use crate::workload::{self, Workload};
use serde_yaml::Value;

/// Extract images from every item of a parsed `List` document, in item order.
pub fn unwrap_list(
    chain: &StrategyChain,
    table: &KindTable,
    value: Value,
    mode: Mode,
) -> Result<Vec<String>> {
    let Workload::List(list) = workload::decode_value(value)? else {
        return Err(ExtractError::Decode("not a List".to_string()));
    };

    let mut images = Vec::new();
    for (i, item) in list.items.iter().enumerate() {
        match extract_item(chain, table, item) {
            Ok(found) => images.extend(found),
            Err(e) if mode.is_tolerant() => {
                log::warn!(
                    "skipping List item {} ({}): {}",
                    i + 1,
                    workload::peek_kind(item).unwrap_or("<no kind>"),
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(images)
}

/// Run one embedded item through the strategy chain.
pub fn extract_item(chain: &StrategyChain, table: &KindTable, item: &Value) -> Result<Vec<String>> {
    if !item.is_mapping() {
        return Err(ExtractError::Decode(format!(
            "List item must be a mapping, found {}",
            workload::decode::describe(item)
        )));
    }
    let kind = match item.get("kind") {
        None | Some(Value::Null) => return Err(ExtractError::MissingKind),
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => return Err(ExtractError::Decode("kind must be a string".to_string())),
    };
    if !table.supports_kind_str(kind) {
        return Err(ExtractError::UnsupportedKind(kind.to_string()));
    }

    let raw = serde_yaml::to_string(item).map_err(|e| ExtractError::Marshal(e.to_string()))?;
    chain.extract(raw.as_bytes())
}
