use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::{DomainError, DomainResult, Entity, TagId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTag")]
pub struct Tag {
    id: TagId,
    label: String,
}

impl Tag {
    pub fn new(id: TagId, label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(DomainError::validation("tag label cannot be empty"));
        }
        Ok(Self { id, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Deserialize)]
struct StoredTag {
    id: TagId,
    label: String,
}

impl TryFrom<StoredTag> for Tag {
    type Error = DomainError;

    fn try_from(stored: StoredTag) -> DomainResult<Self> {
        Tag::new(stored.id, stored.label)
    }
}

impl Entity for Tag {
    type Id = TagId;

    fn id(&self) -> TagId {
        self.id
    }
}

/// Kind of record a tag points at, e.g. `store.product`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType {
    pub app_label: String,
    pub model: String,
}

impl ContentType {
    pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model: model.into(),
        }
    }

    pub fn product() -> Self {
        Self::new("store", "product")
    }
}

impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model)
    }
}

/// Attachment of a tag to an arbitrary record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedItem {
    pub tag_id: TagId,
    pub content_type: ContentType,
    pub object_id: Uuid,
}

impl TaggedItem {
    pub fn new(tag_id: TagId, content_type: ContentType, object_id: impl Into<Uuid>) -> Self {
        Self {
            tag_id,
            content_type,
            object_id: object_id.into(),
        }
    }
}

/// Tags attached to one record, first attachment first, without duplicates.
pub fn tags_for<'a, I>(items: I, content_type: &ContentType, object_id: Uuid) -> Vec<TagId>
where
    I: IntoIterator<Item = &'a TaggedItem>,
{
    let mut out: Vec<TagId> = Vec::new();
    for item in items {
        if item.object_id == object_id
            && &item.content_type == content_type
            && !out.contains(&item.tag_id)
        {
            out.push(item.tag_id);
        }
    }
    out
}
