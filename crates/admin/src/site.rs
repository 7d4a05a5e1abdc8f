use std::sync::Arc;

use uuid::Uuid;

use storefront_core::{CollectionId, CustomerId, OrderId, ProductId, TagId};
use storefront_infra::{Config, InMemoryRepository, Repository};
use storefront_store::{Collection, Customer, Order, Product};
use storefront_tags::{Tag, TaggedItem};

use crate::collection::CollectionAdmin;
use crate::customer::CustomerAdmin;
use crate::order::OrderAdmin;
use crate::product::ProductAdmin;
use crate::tag::TagAdmin;

/// Shared handles to every record store the admins read and write.
#[derive(Clone)]
pub struct StoreRepositories {
    pub collections: Arc<dyn Repository<CollectionId, Collection>>,
    pub products: Arc<dyn Repository<ProductId, Product>>,
    pub customers: Arc<dyn Repository<CustomerId, Customer>>,
    pub orders: Arc<dyn Repository<OrderId, Order>>,
    pub tags: Arc<dyn Repository<TagId, Tag>>,
    pub tagged_items: Arc<dyn Repository<Uuid, TaggedItem>>,
}

impl StoreRepositories {
    pub fn in_memory() -> Self {
        Self {
            collections: Arc::new(InMemoryRepository::new()),
            products: Arc::new(InMemoryRepository::new()),
            customers: Arc::new(InMemoryRepository::new()),
            orders: Arc::new(InMemoryRepository::new()),
            tags: Arc::new(InMemoryRepository::new()),
            tagged_items: Arc::new(InMemoryRepository::new()),
        }
    }
}

impl core::fmt::Debug for StoreRepositories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreRepositories")
            .field("collections", &self.collections.count())
            .field("products", &self.products.count())
            .field("customers", &self.customers.count())
            .field("orders", &self.orders.count())
            .field("tags", &self.tags.count())
            .field("tagged_items", &self.tagged_items.count())
            .finish()
    }
}

/// All registered admins, wired to one set of repositories.
#[derive(Debug, Clone)]
pub struct AdminSite {
    pub products: ProductAdmin,
    pub collections: CollectionAdmin,
    pub customers: CustomerAdmin,
    pub orders: OrderAdmin,
    pub tags: TagAdmin,
}

impl AdminSite {
    pub fn new(repos: &StoreRepositories, config: &Config) -> Self {
        tracing::info!(
            url_prefix = %config.admin_url_prefix,
            default_list_per_page = config.default_list_per_page,
            "admin site configured"
        );
        Self {
            products: ProductAdmin::new(repos),
            collections: CollectionAdmin::new(repos, config),
            customers: CustomerAdmin::new(repos, config),
            orders: OrderAdmin::new(repos),
            tags: TagAdmin::new(repos, config),
        }
    }
}
