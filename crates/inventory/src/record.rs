/// A record that carries an integer stock count.
///
/// The store's `Product` is the main implementor; the rules in this crate
/// only ever read `inventory()` and, for the bulk reset, call `set_inventory`.
pub trait InventoryRecord {
    fn inventory(&self) -> i64;

    fn set_inventory(&mut self, inventory: i64);
}

impl<R: InventoryRecord + ?Sized> InventoryRecord for Box<R> {
    fn inventory(&self) -> i64 {
        (**self).inventory()
    }

    fn set_inventory(&mut self, inventory: i64) {
        (**self).set_inventory(inventory)
    }
}

/// Bare stock count, for callers that only track the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockLevel(pub i64);

impl InventoryRecord for StockLevel {
    fn inventory(&self) -> i64 {
        self.0
    }

    fn set_inventory(&mut self, inventory: i64) {
        self.0 = inventory;
    }
}
