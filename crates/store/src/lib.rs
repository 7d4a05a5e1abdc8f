//! Store domain module: collections, products, customers and orders.
//!
//! Plain validated entities. Persistence and listing live in `storefront-infra`
//! and `storefront-admin`.

pub mod collection;
pub mod customer;
pub mod order;
pub mod product;
pub mod slug;

pub use collection::Collection;
pub use customer::{Customer, Membership, NewCustomer};
pub use order::{Order, OrderItem, PaymentStatus};
pub use product::{NewProduct, Product, MAX_UNIT_PRICE, MIN_UNIT_PRICE};
pub use slug::slugify;
