use crate::record::InventoryRecord;
use crate::status::is_low;

/// Keep only low-stock records, preserving input order.
pub fn filter_low<'a, R, I>(records: I) -> Vec<&'a R>
where
    R: InventoryRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|r| is_low(r.inventory()))
        .collect()
}

/// Owned variant of [`filter_low`].
pub fn retain_low<R: InventoryRecord>(mut records: Vec<R>) -> Vec<R> {
    records.retain(|r| is_low(r.inventory()));
    records
}

/// The "inventory" list filter offered next to a product listing.
///
/// It exposes a single lookup, `("<10", "Low")`. Selecting it narrows the
/// listing to low-stock rows; any other parameter value leaves the listing
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryFilter;

impl InventoryFilter {
    pub const TITLE: &'static str = "inventory";
    pub const PARAMETER_NAME: &'static str = "inventory";
    pub const LOW: &'static str = "<10";

    /// `(value, label)` pairs offered to the user.
    pub fn lookups(&self) -> &'static [(&'static str, &'static str)] {
        &[(Self::LOW, "Low")]
    }

    /// Whether the given parameter value activates the low-stock narrowing.
    pub fn is_selected(&self, value: Option<&str>) -> bool {
        value == Some(Self::LOW)
    }

    /// Apply the filter for a parameter value.
    pub fn apply<'a, R, I>(&self, value: Option<&str>, records: I) -> Vec<&'a R>
    where
        R: InventoryRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        if self.is_selected(value) {
            filter_low(records)
        } else {
            records.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StockLevel;
    use crate::status::LOW_INVENTORY_THRESHOLD;

    fn levels(values: &[i64]) -> Vec<StockLevel> {
        values.iter().copied().map(StockLevel).collect()
    }

    fn counts(records: &[&StockLevel]) -> Vec<i64> {
        records.iter().map(|r| r.0).collect()
    }

    #[test]
    fn filter_low_preserves_order() {
        let records = levels(&[5, 15, 3, 20]);
        assert_eq!(counts(&filter_low(&records)), vec![5, 3]);
    }

    #[test]
    fn filter_low_on_empty_input() {
        let records: Vec<StockLevel> = Vec::new();
        assert!(filter_low(&records).is_empty());
    }

    #[test]
    fn retain_low_matches_filter_low() {
        let records = levels(&[9, 10, -4, 11, 0]);
        let borrowed = counts(&filter_low(&records));
        let owned: Vec<i64> = retain_low(records).into_iter().map(|r| r.0).collect();
        assert_eq!(owned, borrowed);
        assert_eq!(owned, vec![9, -4, 0]);
    }

    #[test]
    fn lookup_value_tracks_threshold() {
        assert_eq!(InventoryFilter::LOW, format!("<{LOW_INVENTORY_THRESHOLD}"));
        assert_eq!(InventoryFilter.lookups(), &[("<10", "Low")]);
    }

    #[test]
    fn unselected_filter_passes_everything_through() {
        let records = levels(&[5, 15, 3, 20]);
        let filter = InventoryFilter;

        assert_eq!(counts(&filter.apply(None, &records)), vec![5, 15, 3, 20]);
        assert_eq!(counts(&filter.apply(Some(">10"), &records)), vec![5, 15, 3, 20]);
        assert_eq!(counts(&filter.apply(Some("<10"), &records)), vec![5, 3]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use crate::status::is_low;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the result is exactly the low records, as an order-preserving subsequence.
            #[test]
            fn filter_low_is_ordered_subsequence(
                values in prop::collection::vec(-50i64..50, 0..64)
            ) {
                let records = levels(&values);
                let expected: Vec<i64> = values.iter().copied().filter(|v| is_low(*v)).collect();
                prop_assert_eq!(counts(&filter_low(&records)), expected);
            }
        }
    }
}
