//! Браузерный клиент блога на Leptos (CSR).
//!
//! Модули без DOM (`models`, `error`, `store`, `view_model`) собираются на
//! любой платформе и тестируются на хосте. Компоненты, HTTP-слой через
//! `gloo-net` и сигналы Leptos есть только в сборке под `wasm32`.

pub mod error;
pub mod models;
pub mod store;
pub mod view_model;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod state;

/// Монтирует приложение в `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
