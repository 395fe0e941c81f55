use async_trait::async_trait;
use chrono::Utc;

use super::store::MemoryStore;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::page::{Page, Pagination};
use crate::domain::post::{Post, PostSort};
use crate::domain::user::Author;

/// Размер пула рекомендаций: первые N постов с картинкой.
pub(crate) const RECOMMENDED_POOL: usize = 50;

#[derive(Debug, Clone)]
pub(crate) struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_posts(
        &self,
        pagination: Pagination,
        sort: PostSort,
    ) -> Result<Page<Post>, DomainError> {
        let tables = self.store.read().await;
        let mut posts: Vec<&Post> = tables.posts.iter().collect();
        match sort {
            PostSort::Latest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            PostSort::Likes => posts.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
        Ok(Page::paginate(posts, pagination).map(Post::clone))
    }

    async fn list_recommended(&self, pagination: Pagination) -> Result<Page<Post>, DomainError> {
        let tables = self.store.read().await;
        let posts: Vec<&Post> = tables
            .posts
            .iter()
            .filter(|post| post.image_url.is_some())
            .take(RECOMMENDED_POOL)
            .collect();
        Ok(Page::paginate(posts, pagination).map(Post::clone))
    }

    async fn list_most_liked(&self, pagination: Pagination) -> Result<Page<Post>, DomainError> {
        let tables = self.store.read().await;
        let mut posts: Vec<&Post> = tables
            .posts
            .iter()
            .filter(|post| post.image_url.is_none())
            .collect();
        posts.sort_by(|a, b| b.likes.cmp(&a.likes));
        Ok(Page::paginate(posts, pagination).map(Post::clone))
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        let tables = self.store.read().await;
        let posts: Vec<&Post> = tables
            .posts
            .iter()
            .filter(|post| post.is_owned_by(author_id))
            .collect();
        Ok(Page::paginate(posts, pagination).map(Post::clone))
    }

    async fn search_posts(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<Page<Post>, DomainError> {
        let needle = query.to_lowercase();
        let tables = self.store.read().await;
        let posts: Vec<&Post> = tables
            .posts
            .iter()
            .filter(|post| post.matches(&needle))
            .collect();
        Ok(Page::paginate(posts, pagination).map(Post::clone))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.store.read().await.post(id).cloned())
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tables = self.store.write().await;
        let author = tables
            .user(input.author_id)
            .map(|record| Author::from(&record.user))
            .ok_or_else(|| DomainError::NotFound(format!("user id: {}", input.author_id)))?;

        let post = Post {
            id: tables.allocate_post_id(),
            title: input.title,
            content: input.content,
            tags: input.tags,
            image_url: input.image_url,
            author,
            created_at: Utc::now(),
            likes: 0,
            comments: 0,
            published: input.published,
        };
        tables.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let mut tables = self.store.write().await;
        let Some(post) = tables.post_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        if let Some(image_url) = patch.image_url {
            post.image_url = Some(image_url);
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.store.write().await;
        let Some(index) = tables.posts.iter().position(|post| post.id == id) else {
            return Ok(false);
        };
        tables.posts.remove(index);
        tables.comments.retain(|comment| comment.post_id != id);
        Ok(true)
    }

    async fn like_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut tables = self.store.write().await;
        Ok(tables.post_mut(id).map(|post| {
            post.likes = post.likes.saturating_add(1);
            post.clone()
        }))
    }
}
