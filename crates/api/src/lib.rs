//! E-commerce API library.
//!
//! JSON API for creating users and products on top of `PostgreSQL`. The
//! binary in `main.rs` wires configuration, the entity store and the router
//! together; everything else lives here so that it can be tested and reused
//! by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
