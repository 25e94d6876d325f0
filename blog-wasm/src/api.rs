use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{Envelope, ListParams, Post, PostInput, PostPage};
use crate::store::PostsApi;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn execute<T: DeserializeOwned>(
    request: Result<Request, gloo_net::Error>,
) -> Result<Envelope<T>, ApiError> {
    let response = request.map_err(network)?.send().await.map_err(network)?;
    read(response).await
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    Envelope::decode(status, &body)
}

/// `PostsApi` поверх `fetch` браузера.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HttpPostsApi;

impl PostsApi for HttpPostsApi {
    async fn list_posts(&self, params: &ListParams) -> Result<PostPage, ApiError> {
        let request = Request::get(&endpoint("/api/posts"))
            .query(params.query_pairs())
            .build();
        execute::<Vec<Post>>(request).await?.into_page()
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let request = Request::get(&endpoint(&format!("/api/posts/{id}"))).build();
        execute::<Post>(request).await?.into_data()
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, ApiError> {
        let request = Request::post(&endpoint("/api/posts")).json(input);
        execute::<Post>(request).await?.into_data()
    }

    async fn update_post(&self, id: &str, input: &PostInput) -> Result<Post, ApiError> {
        let request = Request::put(&endpoint(&format!("/api/posts/{id}"))).json(input);
        execute::<Post>(request).await?.into_data()
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let request = Request::delete(&endpoint(&format!("/api/posts/{id}"))).build();
        execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
