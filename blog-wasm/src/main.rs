#[cfg(target_arch = "wasm32")]
fn main() {
    blog_wasm::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // Пустой main нужен только чтобы `cargo build --workspace` на хосте проходил.
}
