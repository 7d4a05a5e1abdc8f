//! Query parsing, search, ordering and pagination shared by every admin.

use core::cmp::Ordering;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::Serialize;

use storefront_core::{DomainError, DomainResult};

/// Query-string key for the search box.
pub const SEARCH_PARAM: &str = "q";
/// Query-string key for the sort column.
pub const ORDER_PARAM: &str = "o";
/// Query-string key for the 0-based page number.
pub const PAGE_PARAM: &str = "p";

/// Maximum number of suggestions returned by an autocomplete lookup.
pub const AUTOCOMPLETE_LIMIT: usize = 20;

/// A sort column, `-` prefixed when descending (`-title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Flip an ascending comparison when this key is descending.
    pub fn direct(&self, ordering: Ordering) -> Ordering {
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if field.is_empty() {
            return Err(DomainError::validation("empty ordering"));
        }
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(&self.field)
    }
}

/// Parsed listing request: search text, filter parameters, ordering, page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeListQuery {
    search: Option<String>,
    ordering: Option<SortKey>,
    page: usize,
    filters: BTreeMap<String, String>,
}

impl ChangeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded query-string pairs. `q`, `o` and `p` are reserved;
    /// every other key is a filter parameter. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                SEARCH_PARAM => query = query.with_search(value),
                ORDER_PARAM => query.ordering = Some(value.parse()?),
                PAGE_PARAM => {
                    query.page = value.trim().parse().map_err(|_| {
                        DomainError::validation(format!("invalid page number: {value:?}"))
                    })?;
                }
                _ => {
                    query.filters.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(query)
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_string();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }

    pub fn with_ordering(mut self, ordering: SortKey) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn ordering(&self) -> Option<&SortKey> {
        self.ordering.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Whitespace-separated search words.
    pub fn search_terms(&self) -> Vec<&str> {
        self.search
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Reject filter parameters the listing does not understand.
    pub(crate) fn ensure_filters(&self, allowed: &[&str]) -> DomainResult<()> {
        if let Some(unknown) = self.filters.keys().find(|k| !allowed.contains(&k.as_str())) {
            tracing::warn!(parameter = %unknown, "rejected unknown filter parameter");
            return Err(DomainError::validation(format!(
                "unknown filter parameter: {unknown:?}"
            )));
        }
        Ok(())
    }

    /// The requested ordering, checked against the sortable columns.
    pub(crate) fn sort_key(&self, sortable: &[&str]) -> DomainResult<Option<&SortKey>> {
        match &self.ordering {
            Some(key) if !sortable.contains(&key.field.as_str()) => {
                tracing::warn!(ordering = %key, "rejected ordering on unsortable column");
                Err(DomainError::validation(format!(
                    "cannot order by {:?}",
                    key.field
                )))
            }
            other => Ok(other.as_ref()),
        }
    }
}

/// How a search term is compared to a field. All lookups ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    IContains,
    IStartsWith,
    IExact,
}

impl Lookup {
    pub fn matches(self, value: &str, term: &str) -> bool {
        let value = value.to_lowercase();
        let term = term.to_lowercase();
        match self {
            Lookup::IContains => value.contains(&term),
            Lookup::IStartsWith => value.starts_with(&term),
            Lookup::IExact => value == term,
        }
    }
}

/// A row matches when every term matches at least one field.
pub fn matches_search(terms: &[&str], fields: &[(Lookup, &str)]) -> bool {
    terms
        .iter()
        .all(|term| fields.iter().any(|(lookup, value)| lookup.matches(value, term)))
}

/// Splits a listing into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages for `total` rows. An empty listing still has one page.
    pub fn num_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    /// Page `number` (0-based) of `items`. Numbers past the end clamp to the last page.
    pub fn page<T>(&self, items: Vec<T>, number: usize) -> Page<T> {
        let total_count = items.len();
        let num_pages = self.num_pages(total_count);
        let number = number.min(num_pages - 1);

        let items = items
            .into_iter()
            .skip(number * self.per_page)
            .take(self.per_page)
            .collect();

        Page {
            items,
            number,
            num_pages,
            total_count,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub total_count: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total_count: self.total_count,
            per_page: self.per_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// One option of a sidebar filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChoice {
    /// `None` is the "All" option, i.e. the parameter is absent.
    pub value: Option<String>,
    pub label: String,
    pub selected: bool,
}

/// A sidebar filter offered next to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub title: String,
    pub parameter_name: String,
    pub choices: Vec<FilterChoice>,
}

impl FilterSpec {
    /// `lookups` are `(value, label)` pairs; an "All" choice is prepended.
    pub fn new<I, V, L>(
        title: &str,
        parameter_name: &str,
        current: Option<&str>,
        lookups: I,
    ) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut choices = vec![FilterChoice {
            value: None,
            label: "All".to_string(),
            selected: current.is_none(),
        }];
        choices.extend(lookups.into_iter().map(|(value, label)| {
            let value = value.into();
            FilterChoice {
                selected: current == Some(value.as_str()),
                value: Some(value),
                label: label.into(),
            }
        }));

        Self {
            title: title.to_string(),
            parameter_name: parameter_name.to_string(),
            choices,
        }
    }

    pub fn selected(&self) -> Option<&FilterChoice> {
        self.choices.iter().find(|c| c.selected)
    }
}

/// Link from a computed column to another, pre-filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeListLink {
    pub url: String,
    pub label: String,
}

impl ChangeListLink {
    /// `{prefix}{app}/{model}/?{param}={value}`
    pub fn to_changelist(
        prefix: &str,
        app_model: &str,
        param: &str,
        value: impl core::fmt::Display,
        label: impl Into<String>,
    ) -> Self {
        Self {
            url: format!("{prefix}{app_model}/?{param}={value}"),
            label: label.into(),
        }
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteItem {
    pub id: String,
    pub text: String,
}

/// Everything a listing screen needs for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeList<R> {
    pub page: Page<R>,
    pub search: Option<String>,
    pub ordering: Option<SortKey>,
    pub filters: Vec<FilterSpec>,
}
