//! Service layer providing collection operations on top of models.
//! - Separates collection semantics from the HTTP surface.
//! - Reuses validation and record definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod repositories;
pub mod storage;
