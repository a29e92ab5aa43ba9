//! Core business logic for Centavo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `recurrence` - Periodicity calendar arithmetic for recurring obligations
//! - `fixed_account` - Fixed-account payment rules and statistics
//! - `auth` - Password hashing

pub mod auth;
pub mod fixed_account;
pub mod recurrence;
