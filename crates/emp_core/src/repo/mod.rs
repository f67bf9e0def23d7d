//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for employees.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Insert paths enforce `NewEmployee::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod employee_repo;
