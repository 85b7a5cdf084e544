//! Kind-directed extraction over typed workload shapes.

use super::ExtractionStrategy;
use super::container::container_images;
use crate::error::{ExtractError, Result};
use crate::objectkinds::KindTable;
use crate::workload::{self, Workload};

/// Decodes a document into its typed shape and reads images off the
/// embedded pod spec.
///
/// Permissive about content: missing container names and images default to
/// empty strings. `List` documents are rejected here; unwrapping them is the
/// document processor's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedDispatcher {
    table: KindTable,
}

impl TypedDispatcher {
    pub fn new(table: KindTable) -> Self {
        Self { table }
    }

    /// Images of an already-decoded workload.
    pub fn images(&self, workload: &Workload) -> Result<Vec<String>> {
        let kind = workload.kind();
        if !self.table.supports(kind) {
            return Err(ExtractError::UnsupportedKind(kind.to_string()));
        }
        let pod_spec = workload
            .pod_spec()
            .ok_or_else(|| ExtractError::UnsupportedKind(kind.to_string()))?;

        let images = container_images(pod_spec);
        log::trace!("{} {:?}: {:?}", kind, workload.name(), images);
        Ok(images)
    }
}

impl ExtractionStrategy for TypedDispatcher {
    fn name(&self) -> &'static str {
        "typed"
    }

    fn extract(&self, doc: &[u8]) -> Result<Vec<String>> {
        let workload = workload::decode(doc)?;
        self.images(&workload)
    }
}

/// Extract images with the built-in kind table.
pub fn extract_typed(doc: &[u8]) -> Result<Vec<String>> {
    TypedDispatcher::default().extract(doc)
}
