//! Semantic type system
//!
//! Types resolved during analysis and cached on expression nodes for
//! later phases.

mod sem_type;

pub use sem_type::{Signature, Type};
