//! Task domain model and validation.
//!
//! # Responsibility
//! - Define the canonical task record and its creation input.
//! - Own field validation rules shared by repository and callers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard remove from the stored list.

pub mod task;
pub mod validation;
