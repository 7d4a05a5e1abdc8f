//! Generic tagging: labels that can be attached to any store record.

pub mod tag;

pub use tag::{tags_for, ContentType, Tag, TaggedItem};
