//! Storage abstractions for the service layer
//!
//! Contains the reusable in-memory sequence store backing the repository
//! collection. State lives for the process lifetime only.

pub mod memory;
