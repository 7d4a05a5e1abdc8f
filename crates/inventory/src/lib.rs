//! Inventory rules shared by the store listing layer.
//!
//! Everything here is a pure function of a record's `inventory` count:
//! classification for display, the low-stock predicate and list filter, and
//! the bulk reset used by the "clear inventory" action. No IO, no storage.

pub mod filter;
pub mod record;
pub mod reset;
pub mod status;

pub use filter::{filter_low, retain_low, InventoryFilter};
pub use record::{InventoryRecord, StockLevel};
pub use reset::reset_inventory;
pub use status::{classify, is_low, InventoryStatus, LOW_INVENTORY_THRESHOLD};
