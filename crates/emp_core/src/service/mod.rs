//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the business rules layered over storage (search fallback,
//!   in-memory pagination, photo encoding on create).

pub mod employee_service;
pub mod pagination;
