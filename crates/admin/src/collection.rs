use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use storefront_core::{CollectionId, DomainResult, Entity, ProductId};
use storefront_infra::{Config, Repository};
use storefront_store::{Collection, Product};

use crate::changelist::{
    matches_search, AutocompleteItem, ChangeList, ChangeListLink, ChangeListQuery, Lookup,
    Paginator, SortKey, AUTOCOMPLETE_LIMIT,
};
use crate::site::StoreRepositories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRow {
    pub id: CollectionId,
    pub title: String,
    /// Number of products in the collection, linking to those products.
    pub products_count: ChangeListLink,
}

#[derive(Clone)]
pub struct CollectionAdmin {
    collections: Arc<dyn Repository<CollectionId, Collection>>,
    products: Arc<dyn Repository<ProductId, Product>>,
    url_prefix: String,
    per_page: usize,
}

impl core::fmt::Debug for CollectionAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectionAdmin")
            .field("url_prefix", &self.url_prefix)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl CollectionAdmin {
    pub const SORTABLE: [&'static str; 2] = ["title", "products_count"];

    pub fn new(repos: &StoreRepositories, config: &Config) -> Self {
        Self {
            collections: repos.collections.clone(),
            products: repos.products.clone(),
            url_prefix: config.admin_url_prefix.clone(),
            per_page: config.default_list_per_page,
        }
    }

    pub fn add(&self, title: &str) -> DomainResult<CollectionId> {
        let id = CollectionId::new();
        self.collections.upsert(id, Collection::new(id, title)?);
        tracing::info!(collection_id = %id, "collection added");
        Ok(id)
    }

    pub fn changelist(&self, query: &ChangeListQuery) -> DomainResult<ChangeList<CollectionRow>> {
        query.ensure_filters(&[])?;
        let sort = query
            .sort_key(&Self::SORTABLE)?
            .cloned()
            .unwrap_or_else(|| SortKey::asc("title"));
        let terms = query.search_terms();

        let counts = self.products_per_collection();
        let count_of = |c: &Collection| counts.get(&c.id()).copied().unwrap_or(0);

        let mut selected: Vec<Collection> = self
            .collections
            .list()
            .into_iter()
            .filter(|c| matches_search(&terms, &[(Lookup::IContains, c.title())]))
            .collect();
        selected.sort_by(|a, b| {
            let ordering = match sort.field.as_str() {
                "products_count" => count_of(a).cmp(&count_of(b)),
                _ => a.title().cmp(b.title()),
            };
            sort.direct(ordering)
        });

        let page = Paginator::new(self.per_page)
            .page(selected, query.page())
            .map(|c| CollectionRow {
                id: c.id(),
                title: c.title().to_string(),
                products_count: ChangeListLink::to_changelist(
                    &self.url_prefix,
                    "store/product",
                    "collection_id",
                    c.id(),
                    count_of(&c).to_string(),
                ),
            });

        Ok(ChangeList {
            page,
            search: query.search().map(str::to_string),
            ordering: Some(sort),
            filters: Vec::new(),
        })
    }

    /// Title suggestions for collection pickers (product form).
    pub fn autocomplete(&self, term: &str) -> Vec<AutocompleteItem> {
        let terms: Vec<&str> = term.split_whitespace().collect();
        let mut matches: Vec<Collection> = self
            .collections
            .list()
            .into_iter()
            .filter(|c| matches_search(&terms, &[(Lookup::IContains, c.title())]))
            .collect();
        matches.sort_by(|a, b| a.title().cmp(b.title()));
        matches
            .into_iter()
            .take(AUTOCOMPLETE_LIMIT)
            .map(|c| AutocompleteItem {
                id: c.id().to_string(),
                text: c.title().to_string(),
            })
            .collect()
    }

    fn products_per_collection(&self) -> HashMap<CollectionId, usize> {
        let mut counts = HashMap::new();
        for product in self.products.list() {
            *counts.entry(product.collection_id()).or_insert(0) += 1;
        }
        counts
    }
}
