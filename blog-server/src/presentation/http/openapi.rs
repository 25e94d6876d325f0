use utoipa::OpenApi;

use crate::presentation::http::envelope::{ErrorResponseDto, MessageResponseDto};
use crate::presentation::http::handlers::posts::{
    ListPostsQueryDto, ListPostsResponseDto, PaginationDto, PostDto, PostPayloadDto,
    PostResponseDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::admin::reset_store
    ),
    components(
        schemas(
            PostPayloadDto,
            ListPostsQueryDto,
            PostDto,
            PaginationDto,
            PostResponseDto,
            ListPostsResponseDto,
            MessageResponseDto,
            ErrorResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Blog post endpoints"),
        (name = "admin", description = "Development-only maintenance")
    )
)]
pub(crate) struct ApiDoc;
