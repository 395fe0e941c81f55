pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod seed;
pub(crate) mod store;
pub(crate) mod user_repository;
