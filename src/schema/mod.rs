//! Schema-validated extraction.
//!
//! Documents are unified against a structural schema for their kind before
//! any image is read. This path is strict: a container without a `name`
//! fails validation even though the typed dispatcher would accept it.
//!
//! The built-in catalogue lives in `workloads.yaml` and is compiled once per
//! process on first use.

pub mod node;

pub use node::{Definitions, Schema, unify};

use crate::error::{ExtractError, Result};
use crate::extract::ExtractionStrategy;
use crate::objectkinds::{KindTable, PodSpecLocation, WorkloadKind};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

const BUILTIN_SCHEMA: &str = include_str!("workloads.yaml");

static BUILTIN: LazyLock<std::result::Result<Catalogue, String>> =
    LazyLock::new(|| Catalogue::compile(BUILTIN_SCHEMA));

/// The compiled built-in catalogue.
pub fn builtin_catalogue() -> Result<&'static Catalogue> {
    BUILTIN
        .as_ref()
        .map_err(|e| ExtractError::Schema(e.clone()))
}

#[derive(Debug, Deserialize)]
struct CatalogueSource {
    #[serde(default)]
    definitions: BTreeMap<String, Schema>,
    kinds: BTreeMap<String, Schema>,
}

/// Named definitions plus one root schema per workload kind.
#[derive(Debug, Clone)]
pub struct Catalogue {
    definitions: BTreeMap<String, Schema>,
    kinds: BTreeMap<WorkloadKind, Schema>,
}

impl Catalogue {
    /// Parse and check a catalogue document.
    ///
    /// Fails on unknown kind names, references to undefined definitions, and
    /// required fields a struct does not declare.
    pub fn compile(source: &str) -> std::result::Result<Self, String> {
        let source: CatalogueSource =
            serde_yaml::from_str(source).map_err(|e| e.to_string())?;

        let mut kinds = BTreeMap::new();
        for (name, schema) in source.kinds {
            let kind = WorkloadKind::from_kind(&name)
                .filter(|k| *k != WorkloadKind::List)
                .ok_or_else(|| format!("no workload kind named {}", name))?;
            kinds.insert(kind, schema);
        }

        let catalogue = Self {
            definitions: source.definitions,
            kinds,
        };
        catalogue.check()?;
        Ok(catalogue)
    }

    fn check(&self) -> std::result::Result<(), String> {
        let roots = self.definitions.values().chain(self.kinds.values());
        let mut problems = Vec::new();
        for root in roots {
            root.walk(&mut |node| match node {
                Schema::Ref { name } if !self.definitions.contains_key(name) => {
                    problems.push(format!("reference to undefined #{}", name));
                }
                Schema::Struct {
                    fields, required, ..
                } => {
                    for name in required.iter().filter(|n| !fields.contains_key(*n)) {
                        problems.push(format!("required field {} is not declared", name));
                    }
                }
                _ => {}
            });
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Root schema for a kind.
    pub fn schema_for(&self, kind: WorkloadKind) -> Option<&Schema> {
        self.kinds.get(&kind)
    }

    /// Kinds with a schema.
    pub fn kinds(&self) -> impl Iterator<Item = WorkloadKind> + '_ {
        self.kinds.keys().copied()
    }
}

impl Definitions for Catalogue {
    fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }
}

/// Strict extraction through schema unification.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    table: KindTable,
    /// `None` means the built-in catalogue.
    catalogue: Option<Arc<Catalogue>>,
}

impl SchemaValidator {
    pub fn new(table: KindTable) -> Self {
        Self {
            table,
            catalogue: None,
        }
    }

    /// Validate against a custom catalogue instead of the built-in one.
    pub fn with_catalogue(table: KindTable, catalogue: Catalogue) -> Self {
        Self {
            table,
            catalogue: Some(Arc::new(catalogue)),
        }
    }

    fn catalogue(&self) -> Result<&Catalogue> {
        match &self.catalogue {
            Some(catalogue) => Ok(catalogue.as_ref()),
            None => builtin_catalogue(),
        }
    }
}

impl ExtractionStrategy for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn extract(&self, doc: &[u8]) -> Result<Vec<String>> {
        let catalogue = self.catalogue()?;
        let value: Value = serde_yaml::from_slice(doc)?;

        let kind = match value.get("kind") {
            None | Some(Value::Null) => return Err(ExtractError::MissingKind),
            Some(Value::String(kind)) => kind.as_str(),
            Some(_) => return Err(ExtractError::Decode("failed to get kind string".to_string())),
        };
        let unsupported = || ExtractError::UnsupportedKind(kind.to_string());
        let workload_kind = WorkloadKind::from_kind(kind).ok_or_else(unsupported)?;
        let location = self.table.locate(workload_kind).ok_or_else(unsupported)?;
        let schema = catalogue.schema_for(workload_kind).ok_or_else(unsupported)?;

        let violations = unify(catalogue, schema, &value);
        if !violations.is_empty() {
            return Err(ExtractError::Validation(violations));
        }

        validated_images(&value, location)
    }
}

/// Read `containers[].image` then `initContainers[].image` from a value that
/// already passed validation.
fn validated_images(value: &Value, location: PodSpecLocation) -> Result<Vec<String>> {
    let mut pod_spec = value;
    for segment in location.path() {
        pod_spec = pod_spec.get(segment).ok_or_else(|| {
            ExtractError::Decode(format!("failed to get PodSpec at {}", location.dotted()))
        })?;
    }

    let mut images = Vec::new();
    for list in ["containers", "initContainers"] {
        let Some(containers) = pod_spec.get(list).and_then(Value::as_sequence) else {
            continue;
        };
        for container in containers {
            if let Some(image) = container.get("image") {
                let image = image.as_str().ok_or_else(|| {
                    ExtractError::Decode(format!("failed to get image string in {}", list))
                })?;
                images.push(image.to_string());
            }
        }
    }
    Ok(images)
}

/// Extract images with the built-in kind table and catalogue.
pub fn extract_validated(doc: &[u8]) -> Result<Vec<String>> {
    SchemaValidator::default().extract(doc)
}
