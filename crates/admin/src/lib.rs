//! Admin listing layer for the store.
//!
//! Each `*Admin` type answers the questions an admin UI asks about one kind
//! of record: which rows to show for a query (search, filters, ordering,
//! page), which computed columns to display, which filters to offer, and
//! what a bulk action did. Nothing here renders HTML or handles requests.

pub mod changelist;
pub mod collection;
pub mod customer;
pub mod inline;
pub mod messages;
pub mod order;
pub mod product;
pub mod site;
pub mod tag;

pub use changelist::{
    AutocompleteItem, ChangeList, ChangeListLink, ChangeListQuery, FilterChoice, FilterSpec,
    Lookup, Page, Paginator, SortKey,
};
pub use collection::{CollectionAdmin, CollectionRow};
pub use customer::{CustomerAdmin, CustomerRow};
pub use inline::TabularInline;
pub use messages::{ActionResult, AdminMessage, MessageLevel};
pub use order::{OrderAdmin, OrderForm, OrderItemForm, OrderRow};
pub use product::{LastUpdateFilter, ProductAdmin, ProductRow};
pub use site::{AdminSite, StoreRepositories};
pub use tag::{TagAdmin, TagRow};
