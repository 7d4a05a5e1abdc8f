use storefront_core::{DomainError, DomainResult};

/// Row-count rules for a set of child rows edited together with a parent
/// (order items under an order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularInline {
    pub min_num: usize,
    pub max_num: usize,
    /// Blank rows offered beyond the existing/minimum ones.
    pub extra: usize,
}

impl TabularInline {
    /// Check a submitted row count.
    pub fn validate(&self, count: usize) -> DomainResult<()> {
        if count < self.min_num {
            return Err(DomainError::validation(format!(
                "Please submit at least {} form{}.",
                self.min_num,
                plural(self.min_num)
            )));
        }
        if count > self.max_num {
            return Err(DomainError::validation(format!(
                "Please submit at most {} form{}.",
                self.max_num,
                plural(self.max_num)
            )));
        }
        Ok(())
    }

    /// How many blank rows to offer when `existing` rows are already saved.
    pub fn blank_rows(&self, existing: usize) -> usize {
        let total = existing.max(self.min_num) + self.extra;
        let cap = self.max_num.max(existing);
        total.min(cap) - existing
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_ITEMS: TabularInline = TabularInline {
        min_num: 1,
        max_num: 10,
        extra: 0,
    };

    #[test]
    fn bounds_are_inclusive() {
        assert!(ORDER_ITEMS.validate(0).is_err());
        assert!(ORDER_ITEMS.validate(1).is_ok());
        assert!(ORDER_ITEMS.validate(10).is_ok());
        assert!(ORDER_ITEMS.validate(11).is_err());
    }

    #[test]
    fn messages_are_pluralized() {
        let err = ORDER_ITEMS.validate(0).unwrap_err();
        assert_eq!(err, DomainError::validation("Please submit at least 1 form."));
        let err = ORDER_ITEMS.validate(12).unwrap_err();
        assert_eq!(err, DomainError::validation("Please submit at most 10 forms."));
    }

    #[test]
    fn blank_rows_fill_up_to_minimum() {
        assert_eq!(ORDER_ITEMS.blank_rows(0), 1);
        assert_eq!(ORDER_ITEMS.blank_rows(3), 0);

        let generous = TabularInline { min_num: 0, max_num: 4, extra: 3 };
        assert_eq!(generous.blank_rows(0), 3);
        assert_eq!(generous.blank_rows(2), 2);
        assert_eq!(generous.blank_rows(5), 0);
    }
}
