use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFields, PostId};

/// Store double used by handler tests; same ordering and paging rules as Mongo.
#[derive(Default)]
pub(crate) struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub(crate) fn len(&self) -> usize {
        self.posts.lock().expect("posts mutex poisoned").len()
    }

    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        let posts = self.posts.lock().expect("posts mutex poisoned");
        let mut matching: Vec<Post> = posts
            .iter()
            .filter(|post| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| post.category == category)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_str().cmp(a.id.as_str()))
        });
        matching
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        let id = PostId::parse(&ObjectId::new().to_hex())?;
        let post = Post::new(id, input.fields, input.created_at, input.updated_at)?;
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.lock().expect("posts mutex poisoned");
        Ok(posts.iter().find(|post| &post.id == id).cloned())
    }

    async fn update(
        &self,
        id: &PostId,
        fields: PostFields,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let Some(post) = posts.iter_mut().find(|post| &post.id == id) else {
            return Ok(None);
        };

        let updated = Post::new(post.id.clone(), fields, post.created_at, updated_at)?;
        *post = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let before = posts.len();
        posts.retain(|post| &post.id != id);
        Ok(posts.len() < before)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let skip = usize::try_from(pagination.skip()).unwrap_or(usize::MAX);
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(skip)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn reset(&self) -> Result<(), DomainError> {
        self.posts.lock().expect("posts mutex poisoned").clear();
        Ok(())
    }
}
