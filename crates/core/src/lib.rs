//! `storefront-core`: shared domain building blocks for the store workspace.
//!
//! Pure domain primitives only (identifiers, errors, value objects). No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CollectionId, CustomerId, OrderId, ProductId, TagId};
pub use value_object::{Money, ValueObject};
