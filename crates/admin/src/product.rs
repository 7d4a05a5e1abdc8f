use core::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use storefront_core::{CollectionId, DomainError, DomainResult, Entity, Money, ProductId, TagId};
use storefront_infra::Repository;
use storefront_inventory::{reset_inventory, InventoryFilter, InventoryRecord, InventoryStatus};
use storefront_store::{Collection, NewProduct, Product};
use storefront_tags::{tags_for, ContentType, Tag, TaggedItem};

use crate::changelist::{
    matches_search, AutocompleteItem, ChangeList, ChangeListQuery, FilterSpec, Lookup, Paginator,
    SortKey, AUTOCOMPLETE_LIMIT,
};
use crate::messages::{ActionResult, AdminMessage, NOTHING_SELECTED};
use crate::site::StoreRepositories;

/// Date-range choices for the `last_update` filter. Ranges are whole UTC days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastUpdateFilter {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl LastUpdateFilter {
    pub const PARAMETER_NAME: &'static str = "last_update";

    pub const ALL: [LastUpdateFilter; 4] = [
        LastUpdateFilter::Today,
        LastUpdateFilter::Past7Days,
        LastUpdateFilter::ThisMonth,
        LastUpdateFilter::ThisYear,
    ];

    pub fn value(self) -> &'static str {
        match self {
            LastUpdateFilter::Today => "today",
            LastUpdateFilter::Past7Days => "past_7_days",
            LastUpdateFilter::ThisMonth => "this_month",
            LastUpdateFilter::ThisYear => "this_year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LastUpdateFilter::Today => "Today",
            LastUpdateFilter::Past7Days => "Past 7 days",
            LastUpdateFilter::ThisMonth => "This month",
            LastUpdateFilter::ThisYear => "This year",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.value() == value)
            .ok_or_else(|| DomainError::validation(format!("unknown last_update value: {value:?}")))
    }

    /// Half-open `[start, end)` range relative to `now`.
    pub fn range(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();
        let first_of_month = today.with_day(1).unwrap_or(today);
        let first_of_year = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

        let (start, end) = match self {
            LastUpdateFilter::Today => (Some(today), today.succ_opt()),
            LastUpdateFilter::Past7Days => (today.checked_sub_days(Days::new(7)), today.succ_opt()),
            LastUpdateFilter::ThisMonth => (
                Some(first_of_month),
                first_of_month.checked_add_months(Months::new(1)),
            ),
            LastUpdateFilter::ThisYear => (
                Some(first_of_year),
                first_of_year.checked_add_months(Months::new(12)),
            ),
        };

        (
            start.map(midnight).unwrap_or(DateTime::<Utc>::MIN_UTC),
            end.map(midnight).unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.range(now);
        start <= at && at < end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// One line of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub inventory_status: InventoryStatus,
    pub collection_title: String,
}

/// Listing, filters, inline price edits and the "Clear inventory" action for products.
#[derive(Clone)]
pub struct ProductAdmin {
    products: Arc<dyn Repository<ProductId, Product>>,
    collections: Arc<dyn Repository<CollectionId, Collection>>,
    tags: Arc<dyn Repository<TagId, Tag>>,
    tagged_items: Arc<dyn Repository<Uuid, TaggedItem>>,
}

impl core::fmt::Debug for ProductAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductAdmin").finish_non_exhaustive()
    }
}

/// Shown in place of a missing related value.
const EMPTY_VALUE: &str = "-";

impl ProductAdmin {
    pub const LIST_PER_PAGE: usize = 10;
    pub const LIST_DISPLAY: [&'static str; 4] =
        ["title", "unit_price", "inventory_status", "collection_title"];
    pub const SORTABLE: [&'static str; 3] = ["title", "unit_price", "inventory_status"];
    pub const FILTER_PARAMS: [&'static str; 4] = [
        "collection__id__exact",
        "collection_id",
        LastUpdateFilter::PARAMETER_NAME,
        InventoryFilter::PARAMETER_NAME,
    ];
    const COLLECTION_PARAMS: [&'static str; 2] = ["collection__id__exact", "collection_id"];

    pub fn new(repos: &StoreRepositories) -> Self {
        Self {
            products: repos.products.clone(),
            collections: repos.collections.clone(),
            tags: repos.tags.clone(),
            tagged_items: repos.tagged_items.clone(),
        }
    }

    /// Add a product. The collection must already exist.
    pub fn add(&self, new: NewProduct) -> DomainResult<ProductId> {
        if self.collections.get(&new.collection_id).is_none() {
            return Err(DomainError::not_found(format!("collection {}", new.collection_id)));
        }
        let id = ProductId::new();
        let product = Product::create(id, new)?;
        self.products.upsert(id, product);
        tracing::info!(product_id = %id, "product added");
        Ok(id)
    }

    pub fn changelist(&self, query: &ChangeListQuery) -> DomainResult<ChangeList<ProductRow>> {
        self.changelist_at(query, Utc::now())
    }

    /// Same as [`ProductAdmin::changelist`], with date filters evaluated at `now`.
    pub fn changelist_at(
        &self,
        query: &ChangeListQuery,
        now: DateTime<Utc>,
    ) -> DomainResult<ChangeList<ProductRow>> {
        query.ensure_filters(&Self::FILTER_PARAMS)?;
        let sort = query
            .sort_key(&Self::SORTABLE)?
            .cloned()
            .unwrap_or_else(|| SortKey::asc("title"));
        let collection = self.collection_param(query)?;
        let last_update = query
            .filter(LastUpdateFilter::PARAMETER_NAME)
            .map(LastUpdateFilter::parse)
            .transpose()?;
        let terms = query.search_terms();

        let products = self.products.list();
        let mut selected =
            InventoryFilter.apply(query.filter(InventoryFilter::PARAMETER_NAME), &products);
        selected.retain(|p| {
            collection.map_or(true, |c| p.collection_id() == c)
                && last_update.map_or(true, |f| f.contains(p.last_update(), now))
                && matches_search(&terms, &[(Lookup::IContains, p.title())])
        });
        selected.sort_by(|a, b| sort.direct(compare(a, b, &sort.field)));

        let titles: HashMap<CollectionId, String> = self
            .collections
            .list()
            .into_iter()
            .map(|c| (c.id(), c.title().to_string()))
            .collect();

        let page = Paginator::new(Self::LIST_PER_PAGE)
            .page(selected, query.page())
            .map(|p| ProductRow {
                id: p.id(),
                title: p.title().to_string(),
                unit_price: p.unit_price(),
                inventory_status: p.inventory_status(),
                collection_title: titles
                    .get(&p.collection_id())
                    .cloned()
                    .unwrap_or_else(|| EMPTY_VALUE.to_string()),
            });

        Ok(ChangeList {
            page,
            search: query.search().map(str::to_string),
            ordering: Some(sort),
            filters: self.filter_specs(query),
        })
    }

    /// Sidebar filters: collection, last update, inventory.
    pub fn filter_specs(&self, query: &ChangeListQuery) -> Vec<FilterSpec> {
        let mut collections = self.collections.list();
        collections.sort_by(|a, b| a.title().cmp(b.title()));
        let current_collection = Self::COLLECTION_PARAMS.iter().find_map(|p| query.filter(p));

        vec![
            FilterSpec::new(
                "collection",
                Self::COLLECTION_PARAMS[0],
                current_collection,
                collections
                    .iter()
                    .map(|c| (c.id().to_string(), c.title().to_string())),
            ),
            FilterSpec::new(
                "last update",
                LastUpdateFilter::PARAMETER_NAME,
                query.filter(LastUpdateFilter::PARAMETER_NAME),
                LastUpdateFilter::ALL.iter().map(|f| (f.value(), f.label())),
            ),
            FilterSpec::new(
                InventoryFilter::TITLE,
                InventoryFilter::PARAMETER_NAME,
                query.filter(InventoryFilter::PARAMETER_NAME),
                InventoryFilter.lookups().iter().copied(),
            ),
        ]
    }

    /// Title suggestions for product pickers (order items).
    pub fn autocomplete(&self, term: &str) -> Vec<AutocompleteItem> {
        let terms: Vec<&str> = term.split_whitespace().collect();
        let mut matches: Vec<Product> = self
            .products
            .list()
            .into_iter()
            .filter(|p| matches_search(&terms, &[(Lookup::IContains, p.title())]))
            .collect();
        matches.sort_by(|a, b| a.title().cmp(b.title()));
        matches
            .into_iter()
            .take(AUTOCOMPLETE_LIMIT)
            .map(|p| AutocompleteItem {
                id: p.id().to_string(),
                text: p.title().to_string(),
            })
            .collect()
    }

    /// Apply edited unit prices from the listing. All or nothing.
    pub fn edit_unit_prices(
        &self,
        edits: &[(ProductId, Money)],
        now: DateTime<Utc>,
    ) -> DomainResult<usize> {
        let prices: HashMap<ProductId, Money> = edits.iter().copied().collect();
        let ids: Vec<ProductId> = prices.keys().copied().collect();

        let mut result: DomainResult<usize> = Ok(0);
        self.products.update_many(&ids, &mut |rows| {
            if rows.len() != ids.len() {
                result = Err(DomainError::not_found(format!(
                    "{} of {} edited products",
                    ids.len() - rows.len(),
                    ids.len()
                )));
                return;
            }

            let mut staged = Vec::with_capacity(rows.len());
            for row in &rows {
                let mut product = (**row).clone();
                if let Some(&price) = prices.get(&product.id()) {
                    if let Err(e) = product.set_unit_price(price, now) {
                        result = Err(e);
                        return;
                    }
                }
                staged.push(product);
            }

            let updated = staged.len();
            for (row, product) in rows.into_iter().zip(staged) {
                *row = product;
            }
            result = Ok(updated);
        });

        match &result {
            Ok(updated) => tracing::info!(updated, "unit prices edited"),
            Err(e) => tracing::warn!(error = %e, "unit price edit rejected"),
        }
        result
    }

    /// The "Clear inventory" bulk action.
    pub fn clear_inventory(&self, selected: &[ProductId]) -> ActionResult {
        if selected.is_empty() {
            return ActionResult {
                affected: 0,
                message: AdminMessage::warning(NOTHING_SELECTED),
            };
        }

        let mut updated = 0;
        self.products.update_many(selected, &mut |rows| {
            updated = reset_inventory(rows);
        });

        tracing::info!(selected = selected.len(), updated, "clear_inventory action");
        ActionResult {
            affected: updated,
            message: AdminMessage::success(format!("{updated} products were successfully updated")),
        }
    }

    /// Attach a tag to a product. Attaching the same tag twice is a conflict.
    pub fn tag(&self, product_id: ProductId, tag_id: TagId) -> DomainResult<()> {
        if self.products.get(&product_id).is_none() {
            return Err(DomainError::not_found(format!("product {product_id}")));
        }
        if self.tags.get(&tag_id).is_none() {
            return Err(DomainError::not_found(format!("tag {tag_id}")));
        }
        if self.tag_ids(product_id).contains(&tag_id) {
            return Err(DomainError::conflict("product already carries this tag"));
        }

        self.tagged_items.upsert(
            Uuid::now_v7(),
            TaggedItem::new(tag_id, ContentType::product(), product_id),
        );
        Ok(())
    }

    /// Labels of the tags attached to a product.
    pub fn tags(&self, product_id: ProductId) -> Vec<String> {
        self.tags
            .get_many(&self.tag_ids(product_id))
            .into_iter()
            .map(|t| t.label().to_string())
            .collect()
    }

    fn tag_ids(&self, product_id: ProductId) -> Vec<TagId> {
        let items = self.tagged_items.list();
        tags_for(&items, &ContentType::product(), product_id.into())
    }

    fn collection_param(&self, query: &ChangeListQuery) -> DomainResult<Option<CollectionId>> {
        Self::COLLECTION_PARAMS
            .iter()
            .find_map(|p| query.filter(p))
            .map(str::parse::<CollectionId>)
            .transpose()
    }
}

fn compare(a: &Product, b: &Product, field: &str) -> Ordering {
    match field {
        "title" => a.title().cmp(b.title()),
        "unit_price" => a.unit_price().cmp(&b.unit_price()),
        // The status column sorts by the underlying count.
        "inventory_status" => a.inventory().cmp(&b.inventory()),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn last_update_ranges() {
        let now = at(2024, 3, 15, 10);

        assert!(LastUpdateFilter::Today.contains(at(2024, 3, 15, 0), now));
        assert!(!LastUpdateFilter::Today.contains(at(2024, 3, 14, 23), now));

        assert!(LastUpdateFilter::Past7Days.contains(at(2024, 3, 8, 0), now));
        assert!(!LastUpdateFilter::Past7Days.contains(at(2024, 3, 7, 23), now));

        assert!(LastUpdateFilter::ThisMonth.contains(at(2024, 3, 1, 0), now));
        assert!(!LastUpdateFilter::ThisMonth.contains(at(2024, 4, 1, 0), now));

        assert!(LastUpdateFilter::ThisYear.contains(at(2024, 12, 31, 23), now));
        assert!(!LastUpdateFilter::ThisYear.contains(at(2023, 12, 31, 23), now));
    }

    #[test]
    fn last_update_values_parse() {
        for f in LastUpdateFilter::ALL {
            assert_eq!(LastUpdateFilter::parse(f.value()).unwrap(), f);
        }
        assert!(LastUpdateFilter::parse("yesterday").is_err());
    }
}
