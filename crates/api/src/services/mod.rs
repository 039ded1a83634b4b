//! Business logic services.
//!
//! # Services
//!
//! - `password` - Argon2id hashing and verification
//! - `validation` - Uniqueness pre-checks run before an insert
//! - `users` - Create a user: validate, hash, insert
//! - `products` - Create a product: validate, insert
//!
//! Services borrow an [`EntityStore`](crate::db::EntityStore) and return
//! per-operation error enums; handlers map those onto HTTP responses.

pub mod password;
pub mod products;
pub mod users;
pub mod validation;

pub use password::{HashError, hash_password, verify_password};
pub use products::{CreateProductError, ProductService};
pub use users::{CreateUserError, UserService};
pub use validation::{ValidationError, ensure_product_available, ensure_user_available};
