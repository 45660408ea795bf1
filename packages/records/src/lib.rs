//! Concrete record kinds stored by the till.
//!
//! Three kinds, each with a fixed field order and a one-line encoding:
//! - [`Product`] - `id|type|name|price|extra`, pipe-separated
//! - [`User`] - `id|name|balance|is_vip`, pipe-separated
//! - [`Transaction`] - `id,userId,productId,qty,total`, comma-separated
//!
//! Ids are unique per kind (not across kinds) and never reclaimed.

pub mod product;
pub mod transaction;
pub mod user;

pub use product::{Product, ProductKind};
pub use transaction::Transaction;
pub use user::User;
