use serde::{Deserialize, Serialize};

/// Stock counts strictly below this are considered low.
pub const LOW_INVENTORY_THRESHOLD: i64 = 10;

/// Display classification of a stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryStatus {
    Low,
    #[serde(rename = "OK")]
    Ok,
}

impl InventoryStatus {
    pub fn label(self) -> &'static str {
        match self {
            InventoryStatus::Low => "Low",
            InventoryStatus::Ok => "OK",
        }
    }
}

impl core::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a stock count is low. Negative counts are low.
pub fn is_low(inventory: i64) -> bool {
    inventory < LOW_INVENTORY_THRESHOLD
}

/// Classify a stock count for display.
pub fn classify(inventory: i64) -> InventoryStatus {
    if is_low(inventory) {
        InventoryStatus::Low
    } else {
        InventoryStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_exclusive() {
        assert_eq!(classify(9), InventoryStatus::Low);
        assert_eq!(classify(10), InventoryStatus::Ok);
        assert!(is_low(9));
        assert!(!is_low(10));
    }

    #[test]
    fn negative_counts_are_low() {
        assert_eq!(classify(-1), InventoryStatus::Low);
        assert_eq!(classify(i64::MIN), InventoryStatus::Low);
    }

    #[test]
    fn labels_match_column_text() {
        assert_eq!(classify(0).to_string(), "Low");
        assert_eq!(classify(500).to_string(), "OK");
        assert_eq!(serde_json::to_string(&InventoryStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&InventoryStatus::Low).unwrap(), "\"Low\"");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: everything under the threshold is Low, and the predicate agrees.
            #[test]
            fn below_threshold_is_low(i in i64::MIN..LOW_INVENTORY_THRESHOLD) {
                prop_assert_eq!(classify(i), InventoryStatus::Low);
                prop_assert!(is_low(i));
            }

            /// Property: everything at or above the threshold is OK.
            #[test]
            fn at_or_above_threshold_is_ok(i in LOW_INVENTORY_THRESHOLD..i64::MAX) {
                prop_assert_eq!(classify(i), InventoryStatus::Ok);
                prop_assert!(!is_low(i));
            }
        }
    }
}
