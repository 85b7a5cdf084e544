//! Typed workload documents and their decoder.

pub mod decode;
pub mod object;

pub use decode::{decode, decode_value, peek_kind};
pub use object::{ContainerSpec, PodSpec, Workload};
