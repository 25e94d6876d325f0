use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::blog_service::{ListPostsQuery, ListPostsResult};
use crate::domain::post::{Post, PostInput};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::envelope::{ErrorResponseDto, MessageResponseDto};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Body of create and update: every editable field, full replacement.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostPayloadDto {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    pub(crate) content: Option<String>,
    pub(crate) image_url: Option<String>,
    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category must not be empty")
    )]
    pub(crate) category: Option<String>,
    pub(crate) is_markdown: Option<bool>,
}

impl PostPayloadDto {
    fn into_input(self) -> PostInput {
        PostInput {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            image_url: self.image_url,
            category: self.category.unwrap_or_default(),
            is_markdown: self.is_markdown,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ListPostsQueryDto {
    pub(crate) category: Option<String>,
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
    pub(crate) category: String,
    pub(crate) is_markdown: bool,
    #[schema(example = "2026-01-01T00:00:00.000Z")]
    pub(crate) created_at: String,
    #[schema(example = "2026-01-01T00:00:00.000Z")]
    pub(crate) updated_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationDto {
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) total: u64,
    pub(crate) total_pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) success: bool,
    pub(crate) data: PostDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) success: bool,
    pub(crate) data: Vec<PostDto>,
    pub(crate) pagination: PaginationDto,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            category: post.category,
            is_markdown: post.is_markdown,
            created_at: iso8601(post.created_at),
            updated_at: iso8601(post.updated_at),
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        Self {
            success: true,
            data: result.posts.into_iter().map(PostDto::from).collect(),
            pagination: PaginationDto {
                page: result.page,
                limit: result.limit,
                total: result.total,
                total_pages: result.total_pages,
            },
        }
    }
}

impl PostResponseDto {
    fn new(post: Post, message: Option<&str>) -> Self {
        Self {
            success: true,
            data: PostDto::from(post),
            message: message.map(str::to_string),
        }
    }
}

fn iso8601(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("category" = Option<String>, Query, description = "Only posts of this category"),
        ("page" = Option<u32>, Query, description = "Page number (>= 1, default 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100, default 10)")
    ),
    responses(
        (status = 200, description = "Posts listed, newest first", body = ListPostsResponseDto),
        (status = 400, description = "Invalid query", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<ListPostsQueryDto>, QueryRejection>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let Query(query) = query?;
    query.validate()?;

    let result = state
        .blog_service
        .list_posts(ListPostsQuery {
            category: query.category,
            page: query.page.unwrap_or(DEFAULT_PAGE),
            limit: query.limit.unwrap_or(DEFAULT_LIMIT),
        })
        .await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponseDto),
        (status = 400, description = "Malformed id", body = ErrorResponseDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let post = state.blog_service.get_post(&id).await?;

    Ok((StatusCode::OK, Json(PostResponseDto::new(post, None))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = PostPayloadDto,
    responses(
        (status = 201, description = "Post created", body = PostResponseDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostPayloadDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let post = state.blog_service.create_post(dto.into_input()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponseDto::new(post, Some("Post created successfully"))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    request_body = PostPayloadDto,
    responses(
        (status = 200, description = "Post updated", body = PostResponseDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponseDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostPayloadDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let post = state
        .blog_service
        .update_post(&id, dto.into_input())
        .await?;
    Ok((
        StatusCode::OK,
        Json(PostResponseDto::new(post, Some("Post updated successfully"))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponseDto),
        (status = 400, description = "Malformed id", body = ErrorResponseDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponseDto>)> {
    state.blog_service.delete_post(&id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponseDto::new("Post deleted successfully")),
    ))
}
