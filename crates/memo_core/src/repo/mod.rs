//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the memo data access contract used by services.
//! - Isolate storage engine details from business orchestration.
//!
//! # Invariants
//! - Records returned by repositories never carry engine bookkeeping.
//! - Repositories do not enforce lifecycle rules; services do.

pub mod memo_repo;
