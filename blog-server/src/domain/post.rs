use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};

use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 100;

/// Store-assigned identifier: 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PostId(String);

impl PostId {
    pub(crate) fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.len() != 24 || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidId(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five editable fields of a post, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostFields {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
    pub(crate) category: String,
    pub(crate) is_markdown: bool,
}

impl PostFields {
    pub(crate) fn validated(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(self.content)?,
            image_url: self.image_url.trim().to_string(),
            category: normalize_category(&self.category)?,
            is_markdown: self.is_markdown,
        })
    }
}

/// Create/update payload as it arrives from a caller.
#[derive(Debug, Clone)]
pub(crate) struct PostInput {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: Option<String>,
    pub(crate) category: String,
    pub(crate) is_markdown: Option<bool>,
}

impl PostInput {
    pub(crate) fn validate(self) -> Result<PostFields, DomainError> {
        PostFields {
            title: self.title,
            content: self.content,
            image_url: self.image_url.unwrap_or_default(),
            category: self.category,
            is_markdown: self.is_markdown.unwrap_or(false),
        }
        .validated()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Post {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
    pub(crate) category: String,
    pub(crate) is_markdown: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(
        id: PostId,
        fields: PostFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let fields = fields.validated()?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title: fields.title,
            content: fields.content,
            image_url: fields.image_url,
            category: fields.category,
            is_markdown: fields.is_markdown,
            created_at,
            updated_at,
        })
    }
}

/// Current time at the store's millisecond precision.
pub(crate) fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `updated_at` for a write that follows `previous`; always strictly later.
pub(crate) fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::milliseconds(1);
    now_timestamp().max(floor)
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..100 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: String) -> Result<String, DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content)
}

fn normalize_category(category: &str) -> Result<String, DomainError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(DomainError::Validation {
            field: "category",
            message: "must not be empty",
        });
    }
    Ok(category.to_string())
}
