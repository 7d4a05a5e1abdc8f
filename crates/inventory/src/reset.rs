use crate::record::InventoryRecord;

/// Set every record's inventory to zero.
///
/// Returns the number of records updated. Records already at zero still
/// count, so repeating the call over the same selection reports the same
/// number.
pub fn reset_inventory<'a, R, I>(records: I) -> usize
where
    R: InventoryRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut R>,
{
    let mut updated = 0;
    for record in records {
        record.set_inventory(0);
        updated += 1;
    }
    tracing::debug!(updated, "inventory reset");
    updated
}
