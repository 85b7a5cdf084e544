//! Extraction strategies and the fallback chain that combines them.
//!
//! A strategy turns one raw document into an ordered list of image
//! references. [`StrategyChain`] tries its strategies in order and commits to
//! the first one that succeeds with at least one image.

pub mod container;
pub mod typed;

pub use container::{all_containers, container_images};
pub use typed::TypedDispatcher;

use crate::error::Result;
use crate::objectkinds::KindTable;
use crate::schema::SchemaValidator;

/// A way of extracting images from a single document.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Extract images from one raw document.
    fn extract(&self, doc: &[u8]) -> Result<Vec<String>>;
}

/// An ordered list of strategies.
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StrategyChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema validator followed by the typed dispatcher.
    pub fn standard(table: KindTable) -> Self {
        Self::new()
            .with(SchemaValidator::new(table))
            .with(TypedDispatcher::new(table))
    }

    /// Append a strategy to the end of the chain.
    pub fn with(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the strategies, in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the strategies in order.
    ///
    /// Returns the first non-empty success. Otherwise the last strategy's
    /// outcome is returned as-is, whether an empty list or an error.
    pub fn extract(&self, doc: &[u8]) -> Result<Vec<String>> {
        let mut outcome = Ok(Vec::new());
        for strategy in &self.strategies {
            match strategy.extract(doc) {
                Ok(images) if !images.is_empty() => {
                    log::debug!("{} extracted {} image(s)", strategy.name(), images.len());
                    return Ok(images);
                }
                Ok(images) => {
                    log::debug!("{} found no images", strategy.name());
                    outcome = Ok(images);
                }
                Err(e) => {
                    log::debug!("{} failed: {}", strategy.name(), e);
                    outcome = Err(e);
                }
            }
        }
        outcome
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain")
            .field("strategies", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    struct Fixed(&'static str, Result<Vec<String>>);

    impl ExtractionStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _doc: &[u8]) -> Result<Vec<String>> {
            self.1.clone()
        }
    }

    fn images(list: &[&str]) -> Result<Vec<String>> {
        Ok(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_first_non_empty_success_wins() {
        let chain = StrategyChain::new()
            .with(Fixed("empty", images(&[])))
            .with(Fixed("first", images(&["a"])))
            .with(Fixed("second", images(&["b"])));
        assert_eq!(chain.extract(b"").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_error_falls_through() {
        let chain = StrategyChain::new()
            .with(Fixed("broken", Err(ExtractError::MissingKind)))
            .with(Fixed("works", images(&["x", "y"])));
        assert_eq!(chain.extract(b"").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_last_outcome_returned() {
        let chain = StrategyChain::new()
            .with(Fixed("empty", images(&[])))
            .with(Fixed("broken", Err(ExtractError::UnsupportedKind("Service".into()))));
        assert!(matches!(chain.extract(b""), Err(ExtractError::UnsupportedKind(_))));

        let chain = StrategyChain::new()
            .with(Fixed("broken", Err(ExtractError::MissingKind)))
            .with(Fixed("empty", images(&[])));
        assert!(chain.extract(b"").unwrap().is_empty());
    }

    #[test]
    fn test_empty_chain_yields_nothing() {
        assert!(StrategyChain::new().extract(b"kind: Pod").unwrap().is_empty());
    }

    #[test]
    fn test_standard_order() {
        let chain = StrategyChain::standard(KindTable::builtin());
        assert_eq!(chain.names(), vec!["schema", "typed"]);
    }
}
