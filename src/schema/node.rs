//! Schema nodes and unification of YAML values against them.

use crate::error::Violation;
use crate::workload::decode::describe;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// A structural constraint on a YAML value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    #[serde(rename = "string")]
    Str,
    Int,
    Bool,
    /// Accepts anything, including `null`.
    Any,
    /// A string that must equal `value` exactly.
    Const { value: String },
    List { items: Box<Schema> },
    /// String keys mapped to values of one schema.
    Map { values: Box<Schema> },
    Struct {
        #[serde(default)]
        fields: BTreeMap<String, Schema>,
        #[serde(default)]
        required: Vec<String>,
        /// Open structs accept fields they do not declare.
        #[serde(default)]
        open: bool,
    },
    /// Reference to a named definition.
    Ref { name: String },
}

impl Schema {
    /// Visit this node and every nested node.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Schema)) {
        visit(self);
        match self {
            Self::List { items } => items.walk(visit),
            Self::Map { values } => values.walk(visit),
            Self::Struct { fields, .. } => {
                for field in fields.values() {
                    field.walk(visit);
                }
            }
            _ => {}
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Str | Self::Const { .. } => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Any => "any",
            Self::List { .. } => "list",
            Self::Map { .. } | Self::Struct { .. } => "struct",
            Self::Ref { .. } => "reference",
        }
    }
}

/// Resolves `Ref` nodes during unification.
pub trait Definitions {
    fn definition(&self, name: &str) -> Option<&Schema>;
}

/// Unify `value` with `schema`, collecting every violation found.
pub fn unify(defs: &dyn Definitions, schema: &Schema, value: &Value) -> Vec<Violation> {
    let mut unifier = Unifier {
        defs,
        violations: Vec::new(),
    };
    unifier.check(schema, value, "");
    unifier.violations
}

struct Unifier<'a> {
    defs: &'a dyn Definitions,
    violations: Vec<Violation>,
}

impl Unifier<'_> {
    fn check(&mut self, schema: &Schema, value: &Value, path: &str) {
        if let Value::Tagged(tagged) = value {
            return self.check(schema, &tagged.value, path);
        }

        match schema {
            Schema::Any => {}
            Schema::Str => {
                if !value.is_string() {
                    self.mismatch(schema, value, path);
                }
            }
            Schema::Int => {
                if !(value.is_i64() || value.is_u64()) {
                    self.mismatch(schema, value, path);
                }
            }
            Schema::Bool => {
                if !value.is_bool() {
                    self.mismatch(schema, value, path);
                }
            }
            Schema::Const { value: expected } => match value.as_str() {
                Some(actual) if actual == expected => {}
                Some(actual) => self.violation(
                    path,
                    format!("conflicting values \"{}\" and \"{}\"", expected, actual),
                ),
                None => self.mismatch(schema, value, path),
            },
            Schema::List { items } => match value.as_sequence() {
                Some(seq) => {
                    for (i, item) in seq.iter().enumerate() {
                        self.check(items, item, &format!("{}[{}]", path, i));
                    }
                }
                None => self.mismatch(schema, value, path),
            },
            Schema::Map { values } => match value.as_mapping() {
                Some(mapping) => {
                    for (key, item) in mapping {
                        match key.as_str() {
                            Some(key) => self.check(values, item, &child(path, key)),
                            None => self.violation(path, "field names must be strings"),
                        }
                    }
                }
                None => self.mismatch(schema, value, path),
            },
            Schema::Struct {
                fields,
                required,
                open,
            } => {
                let Some(mapping) = value.as_mapping() else {
                    return self.mismatch(schema, value, path);
                };
                for name in required {
                    if !mapping.contains_key(name.as_str()) {
                        self.violation(&child(path, name), "field is required but not present");
                    }
                }
                for (key, item) in mapping {
                    let Some(key) = key.as_str() else {
                        self.violation(path, "field names must be strings");
                        continue;
                    };
                    match fields.get(key) {
                        Some(field) => self.check(field, item, &child(path, key)),
                        None if *open => {}
                        None => self.violation(&child(path, key), "field not allowed"),
                    }
                }
            }
            Schema::Ref { name } => match self.defs.definition(name) {
                Some(def) => self.check(def, value, path),
                None => self.violation(path, format!("reference to undefined #{}", name)),
            },
        }
    }

    fn mismatch(&mut self, schema: &Schema, value: &Value, path: &str) {
        self.violation(
            path,
            format!("expected {}, found {}", schema.type_name(), describe(value)),
        );
    }

    fn violation(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
