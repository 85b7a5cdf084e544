//! Top-level extraction over raw YAML streams.

use crate::error::Result;
use crate::extract::StrategyChain;
use crate::objectkinds::{KindTable, WorkloadKind};
use crate::parser::{split_documents, unwrap_list};
use crate::workload::peek_kind;
use serde_yaml::Value;

/// How failures inside a stream are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The first failing document or `List` item aborts the whole call.
    #[default]
    Strict,
    /// Failing documents and items are logged and skipped.
    Tolerant,
}

impl Mode {
    pub fn is_tolerant(&self) -> bool {
        matches!(self, Self::Tolerant)
    }
}

/// Splits streams into documents and runs each one through a strategy chain.
#[derive(Debug)]
pub struct Extractor {
    table: KindTable,
    chain: StrategyChain,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Extractor with the built-in kind table and the standard chain.
    pub fn new() -> Self {
        let table = KindTable::builtin();
        Self::with_chain(table, StrategyChain::standard(table))
    }

    pub fn with_chain(table: KindTable, chain: StrategyChain) -> Self {
        Self { table, chain }
    }

    pub fn chain(&self) -> &StrategyChain {
        &self.chain
    }

    /// Strict extraction: any failing document aborts with its error.
    pub fn extract(&self, raw: &[u8]) -> Result<Vec<String>> {
        self.process(raw, Mode::Strict)
    }

    /// Tolerant extraction: failing documents are logged and skipped.
    pub fn extract_tolerant(&self, raw: &[u8]) -> Vec<String> {
        // Tolerant processing reports failures through the log, never as Err.
        self.process(raw, Mode::Tolerant).unwrap_or_default()
    }

    /// Process every document of `raw`, concatenating results in order.
    pub fn process(&self, raw: &[u8], mode: Mode) -> Result<Vec<String>> {
        let mut images = Vec::new();
        for doc in split_documents(raw) {
            match self.extract_document(doc.bytes, mode) {
                Ok(found) => {
                    log::debug!("document {} (line {}): {} image(s)", doc.index, doc.line, found.len());
                    images.extend(found);
                }
                Err(e) if mode.is_tolerant() => {
                    log::warn!(
                        "error processing document {} (line {}): {}",
                        doc.index,
                        doc.line,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(images)
    }

    /// Extract a single document, unwrapping it first if it is a `List`.
    pub fn extract_document(&self, doc: &[u8], mode: Mode) -> Result<Vec<String>> {
        if let Ok(value) = serde_yaml::from_slice::<Value>(doc) {
            if peek_kind(&value) == Some(WorkloadKind::List.as_str()) {
                return unwrap_list(&self.chain, &self.table, value, mode);
            }
        }
        self.chain.extract(doc)
    }
}

/// Strict extraction with the default extractor.
pub fn extract_from_bytes(raw: &[u8]) -> Result<Vec<String>> {
    Extractor::new().extract(raw)
}

/// Tolerant extraction with the default extractor.
pub fn extract_from_bytes_tolerant(raw: &[u8]) -> Vec<String> {
    Extractor::new().extract_tolerant(raw)
}
