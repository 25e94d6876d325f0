use std::sync::Arc;

use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId, PostInput, next_update_timestamp, now_timestamp};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsQuery {
    pub(crate) category: Option<String>,
    pub(crate) page: u32,
    pub(crate) limit: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) total: u64,
    pub(crate) total_pages: u64,
}

pub(crate) struct BlogService<R: PostRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PostRepository + ?Sized> BlogService<R> {
    pub(crate) fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let fields = input.validate()?;
        let now = now_timestamp();

        let new_post = NewPost {
            fields,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(new_post).await
    }

    pub(crate) async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        let id = PostId::parse(id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(&self, id: &str, input: PostInput) -> Result<Post, DomainError> {
        let id = PostId::parse(id)?;
        let fields = input.validate()?;

        let current = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))?;
        let updated_at = next_update_timestamp(current.updated_at);

        self.repo
            .update(&id, fields, updated_at)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        let id = PostId::parse(id)?;
        let deleted = self.repo.delete(&id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {id}")));
        }
        Ok(())
    }

    pub(crate) async fn list_posts(
        &self,
        query: ListPostsQuery,
    ) -> Result<ListPostsResult, DomainError> {
        let filter = PostFilter {
            category: query
                .category
                .map(|category| category.trim().to_string())
                .filter(|category| !category.is_empty()),
        };
        let pagination = Pagination {
            page: query.page.max(1),
            limit: query.limit.max(1),
        };

        let posts = self.repo.list(&filter, pagination).await?;
        let total = self.repo.count(&filter).await?;

        Ok(ListPostsResult {
            posts,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: total.div_ceil(u64::from(pagination.limit)),
        })
    }

    pub(crate) async fn reset_store(&self) -> Result<(), DomainError> {
        self.repo.reset().await
    }
}
