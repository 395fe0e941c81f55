use tracing::info;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::page::{Page, Pagination};
use crate::domain::post::{CreatePostRequest, Post, PostSort, UpdatePostRequest};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            tags: req.tags,
            image_url: req.image_url,
            author_id,
            published: req.published,
        };
        let post = self.repo.create_post(new_post).await?;
        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        self.ensure_owner(actor_user_id, post_id).await?;
        let req = req.validate()?;

        let patch = PostPatch {
            title: req.title,
            content: req.content,
            tags: req.tags,
            image_url: req.image_url,
            published: req.published,
        };
        let post = self
            .repo
            .update_post(post_id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;
        info!(post_id, "post updated");
        Ok(post)
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        self.ensure_owner(actor_user_id, post_id).await?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    pub(crate) async fn like_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.repo
            .like_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn list_posts(
        &self,
        pagination: Pagination,
        sort: PostSort,
    ) -> Result<Page<Post>, DomainError> {
        self.repo.list_posts(pagination, sort).await
    }

    pub(crate) async fn list_recommended(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        self.repo.list_recommended(pagination).await
    }

    pub(crate) async fn list_most_liked(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        self.repo.list_most_liked(pagination).await
    }

    pub(crate) async fn list_by_author(
        &self,
        author_id: i64,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        self.repo.list_by_author(author_id, pagination).await
    }

    pub(crate) async fn search_posts(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::Validation {
                field: "query",
                message: "search query is required",
            });
        }
        self.repo.search_posts(query, pagination).await
    }

    async fn ensure_owner(&self, actor_user_id: i64, post_id: i64) -> Result<(), DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_owned_by(actor_user_id) {
            return Err(DomainError::Forbidden("only the author can modify this post"));
        }
        Ok(())
    }
}
