//! Domain models for the three persisted entities.
//!
//! Each entity embeds an [`Audit`] record by value for its key and
//! timestamps. Input shapes (`UserRegistration`, `NewUser`, `NewProduct`,
//! `NewOrder`) are separate from the persisted shapes so that a row can only
//! be written from validated values.

pub mod audit;
pub mod order;
pub mod product;
pub mod text;
pub mod user;

pub use audit::Audit;
pub use order::{NewOrder, Order};
pub use product::{NewProduct, Product};
pub use text::{RequiredText, RequiredTextError};
pub use user::{HashedPassword, NewUser, User, UserRegistration};
