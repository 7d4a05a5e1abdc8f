use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use storefront_core::{CustomerId, DomainError, DomainResult, Entity, OrderId};
use storefront_infra::{Config, Repository};
use storefront_store::{Customer, Membership, NewCustomer, Order};

use crate::changelist::{
    matches_search, AutocompleteItem, ChangeList, ChangeListLink, ChangeListQuery, Lookup,
    Paginator, SortKey, AUTOCOMPLETE_LIMIT,
};
use crate::site::StoreRepositories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRow {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub membership: Membership,
    /// Number of orders placed, linking to those orders.
    pub order_count: ChangeListLink,
}

#[derive(Clone)]
pub struct CustomerAdmin {
    customers: Arc<dyn Repository<CustomerId, Customer>>,
    orders: Arc<dyn Repository<OrderId, Order>>,
    url_prefix: String,
}

impl core::fmt::Debug for CustomerAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CustomerAdmin")
            .field("url_prefix", &self.url_prefix)
            .finish_non_exhaustive()
    }
}

impl CustomerAdmin {
    pub const LIST_PER_PAGE: usize = 10;
    pub const SORTABLE: [&'static str; 4] =
        ["first_name", "last_name", "membership", "order_count"];

    pub fn new(repos: &StoreRepositories, config: &Config) -> Self {
        Self {
            customers: repos.customers.clone(),
            orders: repos.orders.clone(),
            url_prefix: config.admin_url_prefix.clone(),
        }
    }

    /// Register a customer. Emails are unique.
    pub fn add(&self, new: NewCustomer) -> DomainResult<CustomerId> {
        let id = CustomerId::new();
        let customer = Customer::register(id, new)?;
        let email = customer.email().to_string();
        let same_email = |existing: &Customer, added: &Customer| existing.email() == added.email();
        if !self.customers.insert_unique(id, customer, &same_email) {
            return Err(DomainError::conflict(format!(
                "a customer with email {email} already exists"
            )));
        }
        tracing::info!(customer_id = %id, "customer added");
        Ok(id)
    }

    pub fn changelist(&self, query: &ChangeListQuery) -> DomainResult<ChangeList<CustomerRow>> {
        query.ensure_filters(&[])?;
        let sort = query.sort_key(&Self::SORTABLE)?.cloned();
        let terms = query.search_terms();

        let counts = self.orders_per_customer();
        let count_of = |c: &Customer| counts.get(&c.id()).copied().unwrap_or(0);

        let mut selected: Vec<Customer> = self
            .customers
            .list()
            .into_iter()
            .filter(|c| matches_search(&terms, &search_fields(c)))
            .collect();

        match &sort {
            Some(key) => selected.sort_by(|a, b| {
                let ordering = match key.field.as_str() {
                    "last_name" => a.last_name().cmp(b.last_name()),
                    "membership" => a.membership().cmp(&b.membership()),
                    "order_count" => count_of(a).cmp(&count_of(b)),
                    _ => a.first_name().cmp(b.first_name()),
                };
                key.direct(ordering)
            }),
            // Default: first name, then last name.
            None => selected.sort_by(|a, b| {
                a.first_name()
                    .cmp(b.first_name())
                    .then_with(|| a.last_name().cmp(b.last_name()))
            }),
        }

        let page = Paginator::new(Self::LIST_PER_PAGE)
            .page(selected, query.page())
            .map(|c| CustomerRow {
                id: c.id(),
                first_name: c.first_name().to_string(),
                last_name: c.last_name().to_string(),
                membership: c.membership(),
                order_count: ChangeListLink::to_changelist(
                    &self.url_prefix,
                    "store/order",
                    "customer_id",
                    c.id(),
                    count_of(&c).to_string(),
                ),
            });

        Ok(ChangeList {
            page,
            search: query.search().map(str::to_string),
            ordering: sort,
            filters: Vec::new(),
        })
    }

    /// Apply edited memberships from the listing. All or nothing.
    pub fn edit_memberships(&self, edits: &[(CustomerId, Membership)]) -> DomainResult<usize> {
        let memberships: HashMap<CustomerId, Membership> = edits.iter().copied().collect();
        let ids: Vec<CustomerId> = memberships.keys().copied().collect();

        let mut result: DomainResult<usize> = Ok(0);
        self.customers.update_many(&ids, &mut |rows| {
            if rows.len() != ids.len() {
                result = Err(DomainError::not_found(format!(
                    "{} of {} edited customers",
                    ids.len() - rows.len(),
                    ids.len()
                )));
                return;
            }
            let updated = rows.len();
            for row in rows {
                if let Some(&membership) = memberships.get(&row.id()) {
                    row.set_membership(membership);
                }
            }
            result = Ok(updated);
        });

        if let Ok(updated) = &result {
            tracing::info!(updated, "memberships edited");
        }
        result
    }

    /// Name suggestions for customer pickers (order form).
    pub fn autocomplete(&self, term: &str) -> Vec<AutocompleteItem> {
        let terms: Vec<&str> = term.split_whitespace().collect();
        let mut matches: Vec<Customer> = self
            .customers
            .list()
            .into_iter()
            .filter(|c| matches_search(&terms, &search_fields(c)))
            .collect();
        matches.sort_by(|a, b| {
            a.first_name()
                .cmp(b.first_name())
                .then_with(|| a.last_name().cmp(b.last_name()))
        });
        matches
            .into_iter()
            .take(AUTOCOMPLETE_LIMIT)
            .map(|c| AutocompleteItem {
                id: c.id().to_string(),
                text: c.full_name(),
            })
            .collect()
    }

    fn orders_per_customer(&self) -> HashMap<CustomerId, usize> {
        let mut counts = HashMap::new();
        for order in self.orders.list() {
            *counts.entry(order.customer_id()).or_insert(0) += 1;
        }
        counts
    }
}

fn search_fields(c: &Customer) -> [(Lookup, &str); 2] {
    [
        (Lookup::IStartsWith, c.first_name()),
        (Lookup::IStartsWith, c.last_name()),
    ]
}
