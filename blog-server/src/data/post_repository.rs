use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::page::{Page, Pagination};
use crate::domain::post::{Post, PostSort};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) tags: Vec<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) author_id: i64,
    pub(crate) published: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) image_url: Option<String>,
    pub(crate) published: Option<bool>,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list_posts(
        &self,
        pagination: Pagination,
        sort: PostSort,
    ) -> Result<Page<Post>, DomainError>;
    async fn list_recommended(&self, pagination: Pagination) -> Result<Page<Post>, DomainError>;
    async fn list_most_liked(&self, pagination: Pagination) -> Result<Page<Post>, DomainError>;
    async fn list_by_author(
        &self,
        author_id: i64,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError>;
    async fn search_posts(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn like_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
}
