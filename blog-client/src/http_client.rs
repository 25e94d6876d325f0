use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{ListParams, Pagination, Post, PostInput, PostPage};

/// Общий конверт ответов `/api/*`.
#[derive(Debug, Deserialize)]
struct EnvelopeDto<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
    error: Option<String>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthDto {
    status: String,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `blog-server`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    fn list_request(&self, params: &ListParams) -> RequestBuilder {
        self.request(Method::GET, "/api/posts").query(params)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> BlogClientResult<EnvelopeDto<T>> {
        let response = request.send().await.map_err(BlogClientError::from_reqwest)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        parse_envelope(status, &body)
    }

    pub(crate) async fn list_posts(&self, params: &ListParams) -> BlogClientResult<PostPage> {
        let envelope: EnvelopeDto<Vec<Post>> = self.execute(self.list_request(params)).await?;
        let pagination = envelope
            .pagination
            .ok_or_else(|| BlogClientError::Decode("pagination is missing".to_string()))?;
        Ok(PostPage {
            posts: require_data(envelope.data)?,
            pagination,
        })
    }

    pub(crate) async fn get_post(&self, id: &str) -> BlogClientResult<Post> {
        let envelope: EnvelopeDto<Post> = self
            .execute(self.request(Method::GET, &format!("/api/posts/{id}")))
            .await?;
        require_data(envelope.data)
    }

    pub(crate) async fn create_post(&self, input: &PostInput) -> BlogClientResult<Post> {
        let envelope: EnvelopeDto<Post> = self
            .execute(self.request(Method::POST, "/api/posts").json(input))
            .await?;
        require_data(envelope.data)
    }

    pub(crate) async fn update_post(&self, id: &str, input: &PostInput) -> BlogClientResult<Post> {
        let envelope: EnvelopeDto<Post> = self
            .execute(
                self.request(Method::PUT, &format!("/api/posts/{id}"))
                    .json(input),
            )
            .await?;
        require_data(envelope.data)
    }

    pub(crate) async fn delete_post(&self, id: &str) -> BlogClientResult<String> {
        let envelope: EnvelopeDto<serde_json::Value> = self
            .execute(self.request(Method::DELETE, &format!("/api/posts/{id}")))
            .await?;
        Ok(envelope.message.unwrap_or_default())
    }

    pub(crate) async fn reset(&self) -> BlogClientResult<String> {
        let envelope: EnvelopeDto<serde_json::Value> = self
            .execute(self.request(Method::POST, "/api/reset"))
            .await?;
        Ok(envelope.message.unwrap_or_default())
    }

    pub(crate) async fn health(&self) -> BlogClientResult<String> {
        let response = self
            .request(Method::GET, "/healthz")
            .send()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BlogClientError::from_http_status(status, None));
        }

        let dto = response
            .json::<HealthDto>()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        Ok(dto.status)
    }
}

fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> BlogClientResult<EnvelopeDto<T>> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBodyDto>(body)
            .ok()
            .and_then(|dto| dto.error.or(dto.message));
        return Err(BlogClientError::from_http_status(status, message));
    }

    let envelope: EnvelopeDto<T> = serde_json::from_slice(body)
        .map_err(|err| BlogClientError::Decode(err.to_string()))?;
    if !envelope.success {
        let message = envelope
            .error
            .clone()
            .or_else(|| envelope.message.clone())
            .unwrap_or_else(|| "request failed".to_string());
        return Err(BlogClientError::Server { status, message });
    }
    Ok(envelope)
}

fn require_data<T>(data: Option<T>) -> BlogClientResult<T> {
    data.ok_or_else(|| BlogClientError::Decode("data is missing".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{
        "id": "65a1b2c3d4e5f60718293a4b",
        "title": "Hello",
        "content": "World",
        "imageUrl": "",
        "category": "General",
        "isMarkdown": false,
        "createdAt": "2026-01-01T10:00:00.000Z",
        "updatedAt": "2026-01-01T10:00:00.000Z"
    }"#;

    fn client() -> HttpClient {
        HttpClient::new("http://localhost:8080/").expect("client must build")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let full = client().endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn list_query_contains_only_set_params() {
        let request = client()
            .list_request(&ListParams::default())
            .build()
            .expect("request must build");
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/posts");

        let request = client()
            .list_request(&ListParams {
                category: Some("Tech".to_string()),
                page: Some(2),
                limit: None,
            })
            .build()
            .expect("request must build");
        assert_eq!(request.url().query(), Some("category=Tech&page=2"));
    }

    #[test]
    fn parses_single_post_envelope() {
        let body = format!(r#"{{"success":true,"data":{POST_JSON},"message":"Post created successfully"}}"#);

        let envelope: EnvelopeDto<Post> =
            parse_envelope(StatusCode::CREATED, body.as_bytes()).expect("must parse");
        let post = require_data(envelope.data).expect("data present");

        assert_eq!(post.id, "65a1b2c3d4e5f60718293a4b");
        assert_eq!(post.image_url, "");
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(envelope.message.as_deref(), Some("Post created successfully"));
    }

    #[test]
    fn parses_list_envelope_with_pagination() {
        let body = format!(
            r#"{{"success":true,"data":[{POST_JSON}],"pagination":{{"page":1,"limit":10,"total":11,"totalPages":2}}}}"#
        );

        let envelope: EnvelopeDto<Vec<Post>> =
            parse_envelope(StatusCode::OK, body.as_bytes()).expect("must parse");

        assert_eq!(envelope.data.map(|posts| posts.len()), Some(1));
        assert_eq!(
            envelope.pagination,
            Some(Pagination {
                page: 1,
                limit: 10,
                total: 11,
                total_pages: 2
            })
        );
    }

    #[test]
    fn error_message_prefers_error_then_message_then_status() {
        let err = parse_envelope::<Post>(
            StatusCode::BAD_REQUEST,
            br#"{"success":false,"error":"title is required","message":"ignored"}"#,
        )
        .expect_err("must fail");
        assert!(matches!(err, BlogClientError::Validation(m) if m == "title is required"));

        let err = parse_envelope::<Post>(
            StatusCode::FORBIDDEN,
            br#"{"success":false,"message":"This route is only available in development"}"#,
        )
        .expect_err("must fail");
        assert!(
            matches!(err, BlogClientError::Forbidden(m) if m == "This route is only available in development")
        );

        let err = parse_envelope::<Post>(StatusCode::BAD_GATEWAY, b"<html>")
            .expect_err("must fail");
        assert!(matches!(err, BlogClientError::Server { message, .. } if message == "Bad Gateway"));
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = parse_envelope::<Post>(StatusCode::OK, b"not json").expect_err("must fail");
        assert!(matches!(err, BlogClientError::Decode(_)));
    }
}
