use async_trait::async_trait;
use chrono::Utc;

use super::store::MemoryStore;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::user::Author;

#[derive(Debug, Clone)]
pub(crate) struct MemoryCommentRepository {
    store: MemoryStore,
}

impl MemoryCommentRepository {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let tables = self.store.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tables = self.store.write().await;
        let author = tables
            .user(input.author_id)
            .map(|record| Author::from(&record.user))
            .ok_or_else(|| DomainError::NotFound(format!("user id: {}", input.author_id)))?;
        if tables.post(input.post_id).is_none() {
            return Err(DomainError::NotFound(format!("post id: {}", input.post_id)));
        }

        let comment = Comment {
            id: tables.allocate_comment_id(),
            content: input.content,
            author,
            created_at: Utc::now(),
            post_id: input.post_id,
        };
        tables.comments.push(comment.clone());
        // счётчик обновляется под той же блокировкой
        if let Some(post) = tables.post_mut(input.post_id) {
            post.comments = post.comments.saturating_add(1);
        }
        Ok(comment)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.store.write().await;
        let Some(index) = tables.comments.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let removed = tables.comments.remove(index);
        if let Some(post) = tables.post_mut(removed.post_id) {
            post.comments = post.comments.saturating_sub(1);
        }
        Ok(true)
    }
}
