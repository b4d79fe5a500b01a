//! Memo domain model.
//!
//! # Responsibility
//! - Define the canonical memo value and its plain persisted record.
//! - Keep lifecycle rules next to the data they govern.
//!
//! # Invariants
//! - Every memo is identified by a stable string id.
//! - Deletion is a hard delete; there are no tombstones.

pub mod memo;
