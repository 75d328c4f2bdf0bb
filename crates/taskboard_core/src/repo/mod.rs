//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate blob encoding and storage details from the service layer.
//!
//! # Invariants
//! - Repository writes must pass task validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`,
//!   `QuotaExceeded`) in addition to storage transport errors.

pub mod task_repo;
