use leptos::prelude::*;

use crate::api::HttpPostsApi;
use crate::store::{Action, BlogState, PostStore};
use crate::view_model::Route;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) blog: RwSignal<BlogState>,
    pub(crate) route: RwSignal<Route>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            blog: RwSignal::new(BlogState::default()),
            route: RwSignal::new(Route::List),
        }
    }

    pub(crate) fn store(self) -> PostStore<HttpPostsApi, impl Fn(Action)> {
        let blog = self.blog;
        PostStore::new(HttpPostsApi, move |action| {
            blog.update(|state| state.apply(action))
        })
    }

    pub(crate) fn dispatch(self, action: Action) {
        self.blog.update(|state| state.apply(action));
    }

    pub(crate) fn navigate(self, route: Route) {
        self.route.set(route);
    }

    pub(crate) fn dismiss_error(self) {
        self.dispatch(Action::ErrorSet(None));
    }

    pub(crate) fn loading(self) -> bool {
        self.blog.with(|state| state.loading)
    }
}
