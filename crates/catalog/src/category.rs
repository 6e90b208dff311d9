use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, Entity, StoreError, StoreResult};

use crate::slug::slugify;

/// A catalog category. Name and slug are unique across the store (the
/// catalog store enforces uniqueness at insert time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    slug: String,
}

impl Category {
    /// Create a category. The slug is derived from the name when absent.
    pub fn new(name: impl Into<String>, slug: Option<&str>) -> StoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::validation("category name cannot be empty"));
        }

        let slug = match slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&name),
        };
        if slug.is_empty() {
            return Err(StoreError::validation(
                "category name does not yield a usable slug",
            ));
        }

        Ok(Self {
            id: CategoryId::new(),
            name,
            slug,
        })
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
