//! Domain types shared by the admin console crates: entity identifiers,
//! summary records rendered in collection tables, draft payloads posted by
//! forms, and the wire-level error shape.

pub mod domain;
pub mod error;
pub mod payload;
