//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and storage formats.
//! They contain no business logic.

pub mod persistence;
