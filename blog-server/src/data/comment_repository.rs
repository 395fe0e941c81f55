use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) post_id: i64,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError>;
}
