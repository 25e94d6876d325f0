use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFields, PostId};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) fields: PostFields,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostFilter {
    pub(crate) category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) limit: u32,
}

impl Pagination {
    pub(crate) fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;
    /// Replaces the editable fields and `updated_at`; `None` when the id does not resolve.
    async fn update(
        &self,
        id: &PostId,
        fields: PostFields,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete(&self, id: &PostId) -> Result<bool, DomainError>;
    /// Newest first.
    async fn list(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError>;
    async fn count(&self, filter: &PostFilter) -> Result<u64, DomainError>;
    /// Drops every post and forgets that the indexes were created.
    async fn reset(&self) -> Result<(), DomainError>;
}
