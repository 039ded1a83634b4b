//! Core types for the e-commerce backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod inventory;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use inventory::{Quantity, QuantityError, Stock, StockError};
pub use price::{Price, PriceError};
