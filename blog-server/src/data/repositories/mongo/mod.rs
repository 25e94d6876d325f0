mod document;
pub(crate) mod post_repository;
