use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use tracing::{debug, warn};

use super::document::{
    COLLECTION, PostDocument, SchemaCache, category_filter, index_models, newest_first, object_id,
    set_fields,
};
use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFields, PostId};
use crate::infrastructure::database::MongoConnector;

pub(crate) struct MongoPostRepository {
    connector: Arc<MongoConnector>,
    schema: SchemaCache,
}

impl MongoPostRepository {
    pub(crate) fn new(connector: Arc<MongoConnector>) -> Self {
        Self {
            connector,
            schema: SchemaCache::default(),
        }
    }

    async fn collection(&self) -> Result<Collection<PostDocument>, DomainError> {
        let handle = self
            .connector
            .connect()
            .await
            .map_err(|err| DomainError::Unexpected(format!("{err:#}")))?;
        let collection = handle.database().collection::<PostDocument>(COLLECTION);

        let target = &collection;
        let created = self
            .schema
            .ensure(move || async move {
                target
                    .create_indexes(index_models())
                    .await
                    .map(|_| ())
                    .map_err(map_store_error)
            })
            .await?;
        if created {
            debug!(collection = COLLECTION, "post indexes ensured");
        }

        Ok(collection)
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        let collection = self.collection().await?;
        let mut document = PostDocument::new(input.fields, input.created_at, input.updated_at);

        let result = collection
            .insert_one(&document)
            .await
            .map_err(map_store_error)?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            DomainError::Unexpected("store returned a non-ObjectId _id".to_string())
        })?;
        document.id = Some(id);

        document.into_post()
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let collection = self.collection().await?;
        let document = collection
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_store_error)?;

        document.map(PostDocument::into_post).transpose()
    }

    async fn update(
        &self,
        id: &PostId,
        fields: PostFields,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let collection = self.collection().await?;
        let document = collection
            .find_one_and_update(doc! { "_id": object_id(id)? }, set_fields(&fields, updated_at))
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_store_error)?;

        document.map(PostDocument::into_post).transpose()
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let collection = self.collection().await?;
        let result = collection
            .delete_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_store_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let collection = self.collection().await?;
        let mut cursor = collection
            .find(category_filter(filter.category.as_deref()))
            .sort(newest_first())
            .skip(pagination.skip())
            .limit(i64::from(pagination.limit))
            .await
            .map_err(map_store_error)?;

        let mut posts = Vec::new();
        while cursor.advance().await.map_err(map_store_error)? {
            let document = cursor.deserialize_current().map_err(map_store_error)?;
            posts.push(document.into_post()?);
        }
        Ok(posts)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let collection = self.collection().await?;
        collection
            .count_documents(category_filter(filter.category.as_deref()))
            .await
            .map_err(map_store_error)
    }

    async fn reset(&self) -> Result<(), DomainError> {
        let collection = self.collection().await?;
        collection.drop().await.map_err(map_store_error)?;
        self.schema.invalidate();
        warn!(collection = COLLECTION, "post collection dropped");
        Ok(())
    }
}

fn map_store_error(err: mongodb::error::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
