//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the employee record and its insert payload.
//! - Define derived, non-persisted shapes (pages, image data URIs).
//!
//! # Invariants
//! - Every persisted employee is identified by a store-generated `EmployeeId`.
//! - Employees are never deleted; only `dependents_count` changes after insert.

pub mod employee;
pub mod image;
pub mod page;
