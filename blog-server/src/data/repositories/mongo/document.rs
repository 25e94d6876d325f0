use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use mongodb::IndexModel;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFields, PostId};

pub(super) const COLLECTION: &str = "posts";

/// Persisted layout of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(super) id: Option<ObjectId>,
    pub(super) title: String,
    pub(super) content: String,
    #[serde(default)]
    pub(super) image_url: String,
    pub(super) category: String,
    #[serde(default)]
    pub(super) is_markdown: bool,
    pub(super) created_at: bson::DateTime,
    pub(super) updated_at: bson::DateTime,
}

impl PostDocument {
    pub(super) fn new(
        fields: PostFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: fields.title,
            content: fields.content,
            image_url: fields.image_url,
            category: fields.category,
            is_markdown: fields.is_markdown,
            created_at: to_bson_datetime(created_at),
            updated_at: to_bson_datetime(updated_at),
        }
    }

    pub(super) fn into_post(self) -> Result<Post, DomainError> {
        let id = self
            .id
            .ok_or_else(|| DomainError::Unexpected("stored post has no _id".to_string()))?;
        let id = PostId::parse(&id.to_hex())?;

        let fields = PostFields {
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            category: self.category,
            is_markdown: self.is_markdown,
        };

        Post::new(
            id,
            fields,
            from_bson_datetime(self.created_at)?,
            from_bson_datetime(self.updated_at)?,
        )
        .map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}

pub(super) fn set_fields(fields: &PostFields, updated_at: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "title": fields.title.as_str(),
            "content": fields.content.as_str(),
            "imageUrl": fields.image_url.as_str(),
            "category": fields.category.as_str(),
            "isMarkdown": fields.is_markdown,
            "updatedAt": to_bson_datetime(updated_at),
        }
    }
}

pub(super) fn category_filter(category: Option<&str>) -> Document {
    match category {
        Some(category) => doc! { "category": category },
        None => Document::new(),
    }
}

pub(super) fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

pub(super) fn index_models() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "title": "text", "content": "text" })
            .build(),
        IndexModel::builder().keys(doc! { "category": 1 }).build(),
        IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
    ]
}

/// Records that the collection indexes were ensured in this process.
#[derive(Debug, Default)]
pub(super) struct SchemaCache {
    ready: AtomicBool,
}

impl SchemaCache {
    /// Runs `ensure` unless the indexes are already recorded as ready.
    /// Returns whether it ran. A failed run leaves the cache empty.
    pub(super) async fn ensure<F, Fut, E>(&self, ensure: F) -> Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        if self.ready.load(Ordering::Acquire) {
            return Ok(false);
        }
        ensure().await?;
        self.ready.store(true, Ordering::Release);
        Ok(true)
    }

    pub(super) fn invalidate(&self) {
        self.ready.store(false, Ordering::Release);
    }
}

pub(super) fn object_id(id: &PostId) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| DomainError::InvalidId(id.to_string()))
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Result<DateTime<Utc>, DomainError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| DomainError::Unexpected("stored timestamp out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use mongodb::bson::oid::ObjectId;

    use mongodb::bson::{Bson, doc};

    use super::{
        PostDocument, SchemaCache, category_filter, index_models, newest_first, set_fields,
    };
    use crate::domain::error::DomainError;
    use crate::domain::post::PostFields;

    fn fields() -> PostFields {
        PostFields {
            title: "Hello".to_string(),
            content: "World".to_string(),
            image_url: String::new(),
            category: "General".to_string(),
            is_markdown: true,
        }
    }

    #[test]
    fn document_round_trips_into_post() {
        let created_at = Utc.timestamp_millis_opt(1_700_000_000_123).single().expect("ts");
        let updated_at = Utc.timestamp_millis_opt(1_700_000_000_456).single().expect("ts");
        let mut document = PostDocument::new(fields(), created_at, updated_at);
        let oid = ObjectId::new();
        document.id = Some(oid);

        let post = document.into_post().expect("must convert");
        assert_eq!(post.id.as_str(), oid.to_hex());
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.updated_at, updated_at);
        assert!(post.is_markdown);
    }

    #[test]
    fn document_without_id_is_unexpected() {
        let now = Utc::now();
        let err = PostDocument::new(fields(), now, now)
            .into_post()
            .expect_err("missing _id must fail");
        assert!(matches!(err, DomainError::Unexpected(_)));
    }

    #[test]
    fn set_fields_writes_camel_case_keys() {
        let update = set_fields(&fields(), Utc::now());
        let set = update.get_document("$set").expect("$set must exist");

        for key in ["title", "content", "imageUrl", "category", "isMarkdown", "updatedAt"] {
            assert!(set.contains_key(key), "missing {key}");
        }
        assert!(!set.contains_key("createdAt"));
    }

    #[test]
    fn category_filter_is_empty_without_category() {
        assert!(category_filter(None).is_empty());
        assert_eq!(
            category_filter(Some("Tech")).get_str("category").expect("category"),
            "Tech"
        );
    }

    #[test]
    fn index_models_cover_text_category_and_recency() {
        let keys: Vec<_> = index_models().into_iter().map(|model| model.keys).collect();

        assert_eq!(
            keys,
            vec![
                doc! { "title": "text", "content": "text" },
                doc! { "category": 1 },
                doc! { "createdAt": -1 },
            ]
        );
    }

    #[test]
    fn newest_first_breaks_ties_by_id() {
        let sort = newest_first();
        let order: Vec<_> = sort.iter().map(|(key, value)| (key.as_str(), value.clone())).collect();

        assert_eq!(
            order,
            vec![("createdAt", Bson::Int32(-1)), ("_id", Bson::Int32(-1))]
        );
    }

    #[tokio::test]
    async fn schema_cache_ensures_once_until_invalidated() {
        let cache = SchemaCache::default();
        let counter = AtomicUsize::new(0);
        let runs = &counter;

        for _ in 0..3 {
            cache
                .ensure(move || async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, DomainError>(())
                })
                .await
                .expect("ensure must succeed");
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        cache.invalidate();
        let ran = cache
            .ensure(|| async { Ok::<_, DomainError>(()) })
            .await
            .expect("ensure must succeed");
        assert!(ran);
    }

    #[tokio::test]
    async fn schema_cache_stays_empty_after_failed_ensure() {
        let cache = SchemaCache::default();

        let err = cache
            .ensure(|| async { Err(DomainError::Unexpected("index build failed".to_string())) })
            .await
            .expect_err("failure must propagate");
        assert!(matches!(err, DomainError::Unexpected(_)));

        let ran = cache
            .ensure(|| async { Ok::<_, DomainError>(()) })
            .await
            .expect("retry must succeed");
        assert!(ran);
    }
}
