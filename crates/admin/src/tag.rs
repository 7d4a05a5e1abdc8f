use std::sync::Arc;

use serde::Serialize;

use storefront_core::{DomainResult, Entity, TagId};
use storefront_infra::{Config, Repository};
use storefront_tags::Tag;

use crate::changelist::{
    matches_search, AutocompleteItem, ChangeList, ChangeListQuery, Lookup, Paginator, SortKey,
    AUTOCOMPLETE_LIMIT,
};
use crate::site::StoreRepositories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRow {
    pub id: TagId,
    pub label: String,
}

#[derive(Clone)]
pub struct TagAdmin {
    tags: Arc<dyn Repository<TagId, Tag>>,
    per_page: usize,
}

impl core::fmt::Debug for TagAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TagAdmin")
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl TagAdmin {
    pub const SORTABLE: [&'static str; 1] = ["label"];

    pub fn new(repos: &StoreRepositories, config: &Config) -> Self {
        Self {
            tags: repos.tags.clone(),
            per_page: config.default_list_per_page,
        }
    }

    pub fn add(&self, label: &str) -> DomainResult<TagId> {
        let id = TagId::new();
        self.tags.upsert(id, Tag::new(id, label)?);
        tracing::info!(tag_id = %id, "tag added");
        Ok(id)
    }

    pub fn changelist(&self, query: &ChangeListQuery) -> DomainResult<ChangeList<TagRow>> {
        query.ensure_filters(&[])?;
        let sort = query
            .sort_key(&Self::SORTABLE)?
            .cloned()
            .unwrap_or_else(|| SortKey::asc("label"));
        let terms = query.search_terms();

        let mut selected: Vec<Tag> = self
            .tags
            .list()
            .into_iter()
            .filter(|t| matches_search(&terms, &[(Lookup::IContains, t.label())]))
            .collect();
        selected.sort_by(|a, b| sort.direct(a.label().cmp(b.label())));

        let page = Paginator::new(self.per_page)
            .page(selected, query.page())
            .map(|t| TagRow {
                id: t.id(),
                label: t.label().to_string(),
            });

        Ok(ChangeList {
            page,
            search: query.search().map(str::to_string),
            ordering: Some(sort),
            filters: Vec::new(),
        })
    }

    /// Label suggestions for the tag picker.
    pub fn autocomplete(&self, term: &str) -> Vec<AutocompleteItem> {
        let terms: Vec<&str> = term.split_whitespace().collect();
        let mut matches: Vec<Tag> = self
            .tags
            .list()
            .into_iter()
            .filter(|t| matches_search(&terms, &[(Lookup::IContains, t.label())]))
            .collect();
        matches.sort_by(|a, b| a.label().cmp(b.label()));
        matches
            .into_iter()
            .take(AUTOCOMPLETE_LIMIT)
            .map(|t| AutocompleteItem {
                id: t.id().to_string(),
                text: t.label().to_string(),
            })
            .collect()
    }
}
