use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CollectionId, DomainError, DomainResult, Entity, Money, ProductId};
use storefront_inventory::{classify, InventoryRecord, InventoryStatus};

use crate::slug::slugify;

/// Lowest accepted unit price (1.00).
pub const MIN_UNIT_PRICE: Money = Money::from_cents(100);

/// Highest accepted unit price (9999.99).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(999_999);

/// Input for [`Product::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    /// Prepopulated from `title` when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub unit_price: Money,
    pub inventory: i64,
    pub collection_id: CollectionId,
    pub last_update: DateTime<Utc>,
}

/// A sellable product.
///
/// Deserialization runs the same checks as [`Product::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredProduct")]
pub struct Product {
    id: ProductId,
    title: String,
    slug: String,
    description: Option<String>,
    unit_price: Money,
    inventory: i64,
    last_update: DateTime<Utc>,
    collection_id: CollectionId,
}

impl Product {
    pub fn create(id: ProductId, new: NewProduct) -> DomainResult<Self> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }

        let slug = match new.slug {
            Some(s) if !s.trim().is_empty() => slugify(&s),
            _ => slugify(&title),
        };
        if slug.is_empty() {
            return Err(DomainError::validation(format!(
                "cannot derive a slug from title {title:?}"
            )));
        }

        validate_unit_price(new.unit_price)?;
        validate_inventory(new.inventory)?;

        Ok(Self {
            id,
            title,
            slug,
            description: new.description.filter(|d| !d.trim().is_empty()),
            unit_price: new.unit_price,
            inventory: new.inventory,
            last_update: new.last_update,
            collection_id: new.collection_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    pub fn inventory_status(&self) -> InventoryStatus {
        classify(self.inventory)
    }

    pub fn set_unit_price(&mut self, price: Money, now: DateTime<Utc>) -> DomainResult<()> {
        validate_unit_price(price)?;
        self.unit_price = price;
        self.touch(now);
        Ok(())
    }

    /// Record a stock count from a stock-take or receipt.
    pub fn restock(&mut self, inventory: i64, now: DateTime<Utc>) -> DomainResult<()> {
        validate_inventory(inventory)?;
        self.inventory = inventory;
        self.touch(now);
        Ok(())
    }

    pub fn move_to(&mut self, collection_id: CollectionId, now: DateTime<Utc>) {
        self.collection_id = collection_id;
        self.touch(now);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_update = now;
    }
}

/// Wire shape of a [`Product`], validated on the way in.
#[derive(Deserialize)]
struct StoredProduct {
    id: ProductId,
    title: String,
    slug: String,
    description: Option<String>,
    unit_price: Money,
    inventory: i64,
    last_update: DateTime<Utc>,
    collection_id: CollectionId,
}

impl TryFrom<StoredProduct> for Product {
    type Error = DomainError;

    fn try_from(stored: StoredProduct) -> DomainResult<Self> {
        Product::create(
            stored.id,
            NewProduct {
                title: stored.title,
                slug: Some(stored.slug),
                description: stored.description,
                unit_price: stored.unit_price,
                inventory: stored.inventory,
                collection_id: stored.collection_id,
                last_update: stored.last_update,
            },
        )
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl InventoryRecord for Product {
    fn inventory(&self) -> i64 {
        self.inventory
    }

    fn set_inventory(&mut self, inventory: i64) {
        self.inventory = inventory;
    }
}

fn validate_unit_price(price: Money) -> DomainResult<()> {
    if price < MIN_UNIT_PRICE || price > MAX_UNIT_PRICE {
        return Err(DomainError::validation(format!(
            "unit price {price} must be between {MIN_UNIT_PRICE} and {MAX_UNIT_PRICE}"
        )));
    }
    Ok(())
}

fn validate_inventory(inventory: i64) -> DomainResult<()> {
    if inventory < 0 {
        return Err(DomainError::validation("inventory cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use storefront_inventory::reset_inventory;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn new_product(title: &str, inventory: i64) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            slug: None,
            description: None,
            unit_price: Money::from_cents(1999),
            inventory,
            collection_id: CollectionId::new(),
            last_update: test_time(),
        }
    }

    #[test]
    fn create_prepopulates_slug_from_title() {
        let p = Product::create(ProductId::new(), new_product("Bread - Ciabatta", 12)).unwrap();
        assert_eq!(p.slug(), "bread-ciabatta");
        assert_eq!(p.inventory_status(), InventoryStatus::Ok);
    }

    #[test]
    fn explicit_slug_is_normalized() {
        let mut input = new_product("Bread", 1);
        input.slug = Some("Sour Dough".to_string());
        let p = Product::create(ProductId::new(), input).unwrap();
        assert_eq!(p.slug(), "sour-dough");
    }

    #[test]
    fn create_rejects_negative_inventory() {
        let err = Product::create(ProductId::new(), new_product("Bread", -1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_blank_title_and_unsluggable_title() {
        assert!(Product::create(ProductId::new(), new_product("  ", 1)).is_err());
        assert!(Product::create(ProductId::new(), new_product("!!!", 1)).is_err());
    }

    #[test]
    fn unit_price_bounds() {
        let mut input = new_product("Bread", 1);
        input.unit_price = Money::from_cents(99);
        assert!(Product::create(ProductId::new(), input.clone()).is_err());

        input.unit_price = MAX_UNIT_PRICE;
        let mut p = Product::create(ProductId::new(), input).unwrap();

        let later = test_time() + chrono::Duration::hours(1);
        assert!(p.set_unit_price(Money::from_cents(1_000_000), later).is_err());
        assert_eq!(p.last_update(), test_time());

        p.set_unit_price(MIN_UNIT_PRICE, later).unwrap();
        assert_eq!(p.unit_price(), MIN_UNIT_PRICE);
        assert_eq!(p.last_update(), later);
    }

    #[test]
    fn status_follows_inventory() {
        let mut p = Product::create(ProductId::new(), new_product("Bread", 10)).unwrap();
        assert_eq!(p.inventory_status(), InventoryStatus::Ok);

        p.restock(9, test_time()).unwrap();
        assert_eq!(p.inventory_status(), InventoryStatus::Low);
        assert!(p.restock(-3, test_time()).is_err());
        assert_eq!(p.inventory(), 9);
    }

    #[test]
    fn deserialization_revalidates() {
        let p = Product::create(ProductId::new(), new_product("Rye Loaf", 4)).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        let back: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, p);

        let mut negative = json.clone();
        negative["inventory"] = serde_json::json!(-2);
        assert!(serde_json::from_value::<Product>(negative).is_err());

        let mut cheap = json;
        cheap["unit_price"] = serde_json::json!("0.50");
        assert!(serde_json::from_value::<Product>(cheap).is_err());
    }

    #[test]
    fn products_reset_through_inventory_rules() {
        let mut products = vec![
            Product::create(ProductId::new(), new_product("A", 40)).unwrap(),
            Product::create(ProductId::new(), new_product("B", 3)).unwrap(),
        ];
        assert_eq!(reset_inventory(&mut products), 2);
        assert!(products.iter().all(|p| p.inventory() == 0));
        assert!(products.iter().all(|p| p.inventory_status() == InventoryStatus::Low));
    }
}
