//! E-commerce core - shared domain value types.
//!
//! This crate provides the value types used by every component of the
//! e-commerce backend:
//! - `api` - HTTP server, entity store and creation services
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and their validation rules - no I/O,
//! no database access, no HTTP. Database encoding is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, prices, stock levels and order quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
