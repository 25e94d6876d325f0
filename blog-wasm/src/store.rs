//! Клиентское состояние блога и асинхронные операции над ним.
//!
//! `BlogState::apply` это чистый редьюсер: все изменения состояния проходят
//! через `Action`. `PostStore` выполняет запрос к API и отправляет действия
//! в три фазы: `Started`, затем результат или `Failed`.

use core::future::Future;

use crate::error::ApiError;
use crate::models::{ListParams, Pagination, Post, PostInput, PostPage};

pub const DEFAULT_TAGS: [&str; 5] = ["General", "Technology", "Programming", "Design", "Lifestyle"];

const FETCH_POSTS_FAILED: &str = "Не удалось загрузить посты";
const FETCH_POST_FAILED: &str = "Не удалось загрузить пост";
const CREATE_POST_FAILED: &str = "Не удалось создать пост";
const UPDATE_POST_FAILED: &str = "Не удалось обновить пост";
const DELETE_POST_FAILED: &str = "Не удалось удалить пост";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogState {
    pub posts: Vec<Post>,
    pub selected_post: Option<Post>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub tags: Vec<String>,
}

impl Default for BlogState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            selected_post: None,
            loading: false,
            error: None,
            pagination: Pagination::default(),
            tags: DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PostsLoaded(PostPage),
    PostSelected(Option<Post>),
    LoadingSet(bool),
    ErrorSet(Option<String>),
    SelectionCleared,
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(String),
    Started,
    Failed(String),
}

impl BlogState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::PostsLoaded(page) => {
                self.posts = page.posts;
                self.pagination = page.pagination;
                self.loading = false;
            }
            Action::PostSelected(post) => {
                self.selected_post = post;
                self.loading = false;
            }
            Action::LoadingSet(loading) => self.loading = loading,
            Action::ErrorSet(error) => self.error = error,
            Action::SelectionCleared => self.selected_post = None,
            Action::PostCreated(post) => {
                // повторная доставка того же ответа не должна дублировать пост
                self.posts.retain(|existing| existing.id != post.id);
                self.posts.insert(0, post);
                self.loading = false;
            }
            Action::PostUpdated(post) => {
                if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
                    *existing = post.clone();
                }
                if self.selected_post.as_ref().is_some_and(|p| p.id == post.id) {
                    self.selected_post = Some(post);
                }
                self.loading = false;
            }
            Action::PostDeleted(id) => {
                self.posts.retain(|post| post.id != id);
                if self.selected_post.as_ref().is_some_and(|p| p.id == id) {
                    self.selected_post = None;
                }
                self.loading = false;
            }
            Action::Started => {
                self.loading = true;
                self.error = None;
            }
            Action::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}

/// Доступ к REST API постов. В браузере реализуется через `gloo-net`.
#[allow(async_fn_in_trait)]
pub trait PostsApi {
    async fn list_posts(&self, params: &ListParams) -> Result<PostPage, ApiError>;
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;
    async fn create_post(&self, input: &PostInput) -> Result<Post, ApiError>;
    async fn update_post(&self, id: &str, input: &PostInput) -> Result<Post, ApiError>;
    async fn delete_post(&self, id: &str) -> Result<(), ApiError>;
}

pub struct PostStore<A, D> {
    api: A,
    dispatch: D,
}

impl<A, D> PostStore<A, D>
where
    A: PostsApi,
    D: Fn(Action),
{
    pub fn new(api: A, dispatch: D) -> Self {
        Self { api, dispatch }
    }

    pub async fn fetch_posts(&self, params: ListParams) -> Result<PostPage, ApiError> {
        self.run(self.api.list_posts(&params), FETCH_POSTS_FAILED, |page| {
            Action::PostsLoaded(page.clone())
        })
        .await
    }

    pub async fn fetch_post(&self, id: &str) -> Result<Post, ApiError> {
        self.run(self.api.get_post(id), FETCH_POST_FAILED, |post| {
            Action::PostSelected(Some(post.clone()))
        })
        .await
    }

    pub async fn create_post(&self, input: &PostInput) -> Result<Post, ApiError> {
        self.run(self.api.create_post(input), CREATE_POST_FAILED, |post| {
            Action::PostCreated(post.clone())
        })
        .await
    }

    pub async fn update_post(&self, id: &str, input: &PostInput) -> Result<Post, ApiError> {
        self.run(self.api.update_post(id, input), UPDATE_POST_FAILED, |post| {
            Action::PostUpdated(post.clone())
        })
        .await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.run(self.api.delete_post(id), DELETE_POST_FAILED, |_| {
            Action::PostDeleted(id.to_string())
        })
        .await
    }

    async fn run<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
        fallback: &str,
        on_success: impl FnOnce(&T) -> Action,
    ) -> Result<T, ApiError> {
        (self.dispatch)(Action::Started);
        match request.await {
            Ok(value) => {
                (self.dispatch)(on_success(&value));
                Ok(value)
            }
            Err(err) => {
                (self.dispatch)(Action::Failed(err.user_message(fallback)));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: "body".to_string(),
            image_url: String::new(),
            category: "General".to_string(),
            is_markdown: false,
            created_at: "2026-01-01T10:00:00.000Z".to_string(),
            updated_at: "2026-01-01T10:00:00.000Z".to_string(),
        }
    }

    fn input(title: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: "body".to_string(),
            image_url: String::new(),
            category: "General".to_string(),
            is_markdown: false,
        }
    }

    #[derive(Default)]
    struct FakeApi {
        posts: RefCell<Vec<Post>>,
        fail_with: Option<ApiError>,
    }

    impl FakeApi {
        fn failing(err: ApiError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), ApiError> {
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    impl PostsApi for FakeApi {
        async fn list_posts(&self, params: &ListParams) -> Result<PostPage, ApiError> {
            self.check()?;
            let posts = self.posts.borrow().clone();
            Ok(PostPage {
                pagination: Pagination {
                    page: params.page.unwrap_or(1),
                    limit: params.limit.unwrap_or(10),
                    total: posts.len() as u64,
                    total_pages: 1,
                },
                posts,
            })
        }

        async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
            self.check()?;
            self.posts
                .borrow()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(ApiError::Http {
                    status: 404,
                    message: String::new(),
                })
        }

        async fn create_post(&self, input: &PostInput) -> Result<Post, ApiError> {
            self.check()?;
            let created = post("new-id", &input.title);
            self.posts.borrow_mut().insert(0, created.clone());
            Ok(created)
        }

        async fn update_post(&self, id: &str, input: &PostInput) -> Result<Post, ApiError> {
            self.check()?;
            let mut updated = post(id, &input.title);
            updated.updated_at = "2026-01-01T11:00:00.000Z".to_string();
            Ok(updated)
        }

        async fn delete_post(&self, _id: &str) -> Result<(), ApiError> {
            self.check()
        }
    }

    struct Harness {
        state: Rc<RefCell<BlogState>>,
        log: Rc<RefCell<Vec<Action>>>,
    }

    fn store(api: FakeApi) -> (PostStore<FakeApi, impl Fn(Action)>, Harness) {
        let state = Rc::new(RefCell::new(BlogState::default()));
        let log = Rc::new(RefCell::new(Vec::new()));
        let dispatch = {
            let state = state.clone();
            let log = log.clone();
            move |action: Action| {
                log.borrow_mut().push(action.clone());
                state.borrow_mut().apply(action);
            }
        };
        (PostStore::new(api, dispatch), Harness { state, log })
    }

    #[test]
    fn initial_state_has_default_tags_and_pagination() {
        let state = BlogState::default();
        assert_eq!(state.tags, DEFAULT_TAGS);
        assert_eq!(
            state.pagination,
            Pagination {
                page: 1,
                limit: 10,
                total: 0,
                total_pages: 0
            }
        );
        assert!(!state.loading);
    }

    #[test]
    fn deleting_selected_post_clears_selection() {
        let mut state = BlogState::default();
        state.posts = vec![post("a", "A"), post("b", "B")];
        state.apply(Action::PostSelected(Some(post("a", "A"))));

        state.apply(Action::PostDeleted("a".to_string()));

        assert!(state.selected_post.is_none());
        assert_eq!(state.posts, vec![post("b", "B")]);
    }

    #[test]
    fn update_replaces_list_entry_and_selected_post() {
        let mut state = BlogState::default();
        state.posts = vec![post("a", "A"), post("b", "B")];
        state.selected_post = Some(post("b", "B"));

        state.apply(Action::PostUpdated(post("b", "B2")));

        assert_eq!(state.posts[1].title, "B2");
        assert_eq!(state.selected_post.as_ref().map(|p| p.title.as_str()), Some("B2"));
    }

    #[test]
    fn repeated_success_actions_are_idempotent() {
        let mut once = BlogState::default();
        once.apply(Action::PostCreated(post("a", "A")));
        once.apply(Action::PostDeleted("x".to_string()));

        let mut twice = once.clone();
        twice.apply(Action::PostCreated(post("a", "A")));
        twice.apply(Action::PostDeleted("x".to_string()));

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn fetch_posts_follows_three_phases() {
        let api = FakeApi::default();
        api.posts.borrow_mut().push(post("a", "A"));
        let (store, harness) = store(api);

        let page = store
            .fetch_posts(ListParams::default())
            .await
            .expect("fetch must succeed");

        assert_eq!(page.posts.len(), 1);
        let log = harness.log.borrow();
        assert_eq!(log[0], Action::Started);
        assert!(matches!(log[1], Action::PostsLoaded(_)));
        let state = harness.state.borrow();
        assert!(!state.loading);
        assert_eq!(state.posts, vec![post("a", "A")]);
        assert_eq!(state.pagination.total, 1);
    }

    #[tokio::test]
    async fn failure_keeps_data_and_sets_message() {
        let (store, harness) = store(FakeApi::failing(ApiError::Http {
            status: 400,
            message: "title is required".to_string(),
        }));
        harness.state.borrow_mut().posts = vec![post("a", "A")];
        harness.state.borrow_mut().error = Some("old".to_string());

        let result = store.create_post(&input("")).await;

        assert!(result.is_err());
        let state = harness.state.borrow();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("title is required"));
        assert_eq!(state.posts, vec![post("a", "A")]);
    }

    #[tokio::test]
    async fn failure_without_server_message_uses_operation_fallback() {
        let (store, harness) = store(FakeApi::failing(ApiError::Decode("eof".to_string())));

        let _ = store.delete_post("a").await;

        assert_eq!(
            harness.state.borrow().error.as_deref(),
            Some("Не удалось удалить пост")
        );
    }

    #[tokio::test]
    async fn create_inserts_at_front_and_clears_previous_error() {
        let (store, harness) = store(FakeApi::default());
        harness.state.borrow_mut().posts = vec![post("a", "A")];
        harness.state.borrow_mut().error = Some("old".to_string());

        let created = store.create_post(&input("N")).await.expect("create must succeed");

        let state = harness.state.borrow();
        assert_eq!(state.posts[0], created);
        assert_eq!(state.posts.len(), 2);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn fetch_then_delete_selected_post_clears_selection() {
        let api = FakeApi::default();
        api.posts.borrow_mut().push(post("a", "A"));
        let (store, harness) = store(api);

        store.fetch_post("a").await.expect("fetch must succeed");
        assert!(harness.state.borrow().selected_post.is_some());

        store.delete_post("a").await.expect("delete must succeed");
        assert!(harness.state.borrow().selected_post.is_none());
    }

    #[tokio::test]
    async fn update_refreshes_selected_post() {
        let api = FakeApi::default();
        api.posts.borrow_mut().push(post("a", "A"));
        let (store, harness) = store(api);
        store.fetch_post("a").await.expect("fetch must succeed");

        store
            .update_post("a", &input("A2"))
            .await
            .expect("update must succeed");

        let state = harness.state.borrow();
        let selected = state.selected_post.as_ref().expect("selection kept");
        assert_eq!(selected.title, "A2");
        assert_eq!(selected.updated_at, "2026-01-01T11:00:00.000Z");
    }
}
