//! # kir
//!
//! Extracts container image references from Kubernetes workload manifests.
//!
//! Input is a YAML byte stream: a single document, a `---` separated
//! sequence, or a `List` whose items are workload documents. Output is the
//! ordered list of images, main containers before init containers, in
//! document order. Nothing is deduplicated or sorted.
//!
//! Each document is first unified against a structural schema for its kind.
//! If that fails or finds nothing, the document is decoded into a permissive
//! typed shape instead.
//!
//! ## Example
//!
//! ```rust
//! let manifest = br#"
//! apiVersion: v1
//! kind: Pod
//! metadata:
//!   name: web
//! spec:
//!   containers:
//!   - name: web
//!     image: nginx:1.25
//! "#;
//!
//! let images = kir::extract_from_bytes(manifest)?;
//! assert_eq!(images, vec!["nginx:1.25"]);
//! # Ok::<(), kir::ExtractError>(())
//! ```
//!
//! Supported kinds: Pod, Deployment, DaemonSet, ReplicaSet, StatefulSet,
//! Job, CronJob and List.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod files;
pub mod objectkinds;
pub mod parser;
pub mod pipeline;
pub mod schema;
pub mod workload;

pub use error::{ExtractError, KirError, Result, Violation};
pub use extract::{ExtractionStrategy, StrategyChain, TypedDispatcher};
pub use objectkinds::{KindTable, PodSpecLocation, WorkloadKind};
pub use pipeline::{Extractor, Mode, extract_from_bytes, extract_from_bytes_tolerant};
pub use schema::SchemaValidator;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
