use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, DomainError, DomainResult, Entity, Money, OrderId, ProductId};
use storefront_infra::Repository;
use storefront_store::{Customer, Order, OrderItem, Product};

use crate::changelist::{ChangeList, ChangeListQuery, FilterSpec, Paginator};
use crate::inline::TabularInline;
use crate::site::StoreRepositories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub customer_first_name: String,
}

/// One submitted order-item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemForm {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Defaults to the product's current unit price.
    pub unit_price: Option<Money>,
}

/// A submitted order with its item rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub customer_id: CustomerId,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItemForm>,
}

#[derive(Clone)]
pub struct OrderAdmin {
    orders: Arc<dyn Repository<OrderId, Order>>,
    customers: Arc<dyn Repository<CustomerId, Customer>>,
    products: Arc<dyn Repository<ProductId, Product>>,
}

impl core::fmt::Debug for OrderAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderAdmin").finish_non_exhaustive()
    }
}

impl OrderAdmin {
    pub const LIST_PER_PAGE: usize = 10;
    pub const SORTABLE: [&'static str; 2] = ["id", "placed_at"];
    pub const CUSTOMER_PARAM: &'static str = "customer_id";

    /// Order items are edited inline: at least one, at most ten, no blank extras.
    pub const ITEMS: TabularInline = TabularInline {
        min_num: 1,
        max_num: 10,
        extra: 0,
    };

    pub fn new(repos: &StoreRepositories) -> Self {
        Self {
            orders: repos.orders.clone(),
            customers: repos.customers.clone(),
            products: repos.products.clone(),
        }
    }

    /// Validate and store a new order.
    pub fn save_order(&self, form: OrderForm) -> DomainResult<OrderId> {
        Self::ITEMS.validate(form.items.len())?;

        if self.customers.get(&form.customer_id).is_none() {
            return Err(DomainError::not_found(format!("customer {}", form.customer_id)));
        }

        let product_ids: Vec<ProductId> = form.items.iter().map(|i| i.product_id).collect();
        let prices: HashMap<ProductId, Money> = self
            .products
            .get_many(&product_ids)
            .into_iter()
            .map(|p| (p.id(), p.unit_price()))
            .collect();

        let items = form
            .items
            .into_iter()
            .map(|row| {
                let current = prices
                    .get(&row.product_id)
                    .copied()
                    .ok_or_else(|| DomainError::not_found(format!("product {}", row.product_id)))?;
                OrderItem::new(row.product_id, row.quantity, row.unit_price.unwrap_or(current))
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let id = OrderId::new();
        let order = Order::place(id, form.customer_id, form.placed_at, items);
        order.total()?;
        self.orders.upsert(id, order);

        tracing::info!(order_id = %id, customer_id = %form.customer_id, "order saved");
        Ok(id)
    }

    pub fn changelist(&self, query: &ChangeListQuery) -> DomainResult<ChangeList<OrderRow>> {
        query.ensure_filters(&[Self::CUSTOMER_PARAM])?;
        let sort = query.sort_key(&Self::SORTABLE)?.cloned();
        let customer = query
            .filter(Self::CUSTOMER_PARAM)
            .map(str::parse::<CustomerId>)
            .transpose()?;

        let mut selected: Vec<Order> = self
            .orders
            .list()
            .into_iter()
            .filter(|o| customer.map_or(true, |c| o.customer_id() == c))
            .collect();
        if let Some(key) = &sort {
            selected.sort_by(|a, b| {
                let ordering = match key.field.as_str() {
                    "placed_at" => a.placed_at().cmp(&b.placed_at()),
                    _ => a.id().cmp(&b.id()),
                };
                key.direct(ordering)
            });
        }

        let first_names: HashMap<CustomerId, String> = self
            .customers
            .list()
            .into_iter()
            .map(|c| (c.id(), c.first_name().to_string()))
            .collect();

        let page = Paginator::new(Self::LIST_PER_PAGE)
            .page(selected, query.page())
            .map(|o| OrderRow {
                id: o.id(),
                placed_at: o.placed_at(),
                customer_first_name: first_names
                    .get(&o.customer_id())
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
            });

        let current = query.filter(Self::CUSTOMER_PARAM);
        let customer_choices = current
            .and_then(|value| {
                let id = value.parse::<CustomerId>().ok()?;
                let name = self.customers.get(&id)?.full_name();
                Some((value.to_string(), name))
            })
            .into_iter();

        Ok(ChangeList {
            page,
            search: None,
            ordering: sort,
            filters: vec![FilterSpec::new(
                "customer",
                Self::CUSTOMER_PARAM,
                current,
                customer_choices,
            )],
        })
    }
}
