use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, DomainError, DomainResult, Entity, Money, OrderId, ProductId};

/// Payment state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "C")]
    Complete,
    #[serde(rename = "F")]
    Failed,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Complete => "Complete",
            PaymentStatus::Failed => "Failed",
        }
    }
}

/// One product line of an order. The unit price is captured at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: ProductId,
    quantity: u32,
    unit_price: Money,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Money) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        Ok(Self {
            product_id,
            quantity,
            unit_price,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price
            .checked_mul(self.quantity)
            .ok_or_else(|| DomainError::invariant("line total overflow"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    placed_at: DateTime<Utc>,
    payment_status: PaymentStatus,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn place(
        id: OrderId,
        customer_id: CustomerId,
        placed_at: DateTime<Utc>,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            id,
            placed_at,
            payment_status: PaymentStatus::Pending,
            customer_id,
            items,
        }
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> DomainResult<Money> {
        self.items.iter().try_fold(Money::ZERO, |acc, item| {
            acc.checked_add(item.line_total()?)
                .ok_or_else(|| DomainError::invariant("order total overflow"))
        })
    }

    /// Settle a pending order. Settled orders cannot change status again.
    pub fn settle(&mut self, status: PaymentStatus) -> DomainResult<()> {
        if self.payment_status != PaymentStatus::Pending {
            return Err(DomainError::conflict(format!(
                "order payment already {}",
                self.payment_status.label().to_ascii_lowercase()
            )));
        }
        if status == PaymentStatus::Pending {
            return Err(DomainError::validation("cannot settle an order as pending"));
        }
        self.payment_status = status;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cents: u64, qty: u32) -> OrderItem {
        OrderItem::new(ProductId::new(), qty, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(OrderItem::new(ProductId::new(), 0, Money::from_cents(100)).is_err());
    }

    #[test]
    fn total_sums_lines() {
        let order = Order::place(
            OrderId::new(),
            CustomerId::new(),
            Utc::now(),
            vec![item(250, 2), item(1000, 1)],
        );
        assert_eq!(order.total().unwrap(), Money::from_cents(1500));
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn total_reports_overflow() {
        let order = Order::place(
            OrderId::new(),
            CustomerId::new(),
            Utc::now(),
            vec![item(u64::MAX, 2)],
        );
        assert!(matches!(order.total(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn settle_only_once() {
        let mut order =
            Order::place(OrderId::new(), CustomerId::new(), Utc::now(), vec![item(100, 1)]);
        assert!(order.settle(PaymentStatus::Pending).is_err());
        order.settle(PaymentStatus::Complete).unwrap();
        assert!(matches!(order.settle(PaymentStatus::Failed), Err(DomainError::Conflict(_))));
    }
}
