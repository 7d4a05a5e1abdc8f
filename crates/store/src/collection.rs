use serde::{Deserialize, Serialize};

use storefront_core::{CollectionId, DomainError, DomainResult, Entity, ProductId};

/// A named group of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCollection")]
pub struct Collection {
    id: CollectionId,
    title: String,
    featured_product: Option<ProductId>,
}

impl Collection {
    pub fn new(id: CollectionId, title: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            id,
            title: validate_title(title.into())?,
            featured_product: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn featured_product(&self) -> Option<ProductId> {
        self.featured_product
    }

    pub fn rename(&mut self, title: impl Into<String>) -> DomainResult<()> {
        self.title = validate_title(title.into())?;
        Ok(())
    }

    pub fn feature(&mut self, product: Option<ProductId>) {
        self.featured_product = product;
    }
}

#[derive(Deserialize)]
struct StoredCollection {
    id: CollectionId,
    title: String,
    featured_product: Option<ProductId>,
}

impl TryFrom<StoredCollection> for Collection {
    type Error = DomainError;

    fn try_from(stored: StoredCollection) -> DomainResult<Self> {
        let mut collection = Collection::new(stored.id, stored.title)?;
        collection.feature(stored.featured_product);
        Ok(collection)
    }
}

impl Entity for Collection {
    type Id = CollectionId;

    fn id(&self) -> CollectionId {
        self.id
    }
}

fn validate_title(title: String) -> DomainResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("collection title cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_rejects_blank_title() {
        let id = CollectionId::new();
        let json = format!(r#"{{"id":"{id}","title":"  ","featured_product":null}}"#);
        assert!(serde_json::from_str::<Collection>(&json).is_err());

        let json = format!(r#"{{"id":"{id}","title":" Toys ","featured_product":null}}"#);
        let c: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(c.title(), "Toys");
    }

    #[test]
    fn title_is_trimmed() {
        let c = Collection::new(CollectionId::new(), "  Beauty ").unwrap();
        assert_eq!(c.title(), "Beauty");
        assert_eq!(c.featured_product(), None);
    }

    #[test]
    fn rejects_blank_title() {
        let err = Collection::new(CollectionId::new(), "   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rename_keeps_old_title_on_error() {
        let mut c = Collection::new(CollectionId::new(), "Toys").unwrap();
        assert!(c.rename("").is_err());
        assert_eq!(c.title(), "Toys");
    }
}
