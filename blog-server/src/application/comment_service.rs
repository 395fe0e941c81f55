use tracing::info;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::{Comment, CreateCommentRequest};
use crate::domain::error::DomainError;

pub(crate) struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Unknown post yields an empty list.
    pub(crate) async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.repo.list_by_post(post_id).await
    }

    pub(crate) async fn create_comment(
        &self,
        author_id: i64,
        post_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        let comment = self
            .repo
            .create_comment(NewComment {
                content: req.content,
                author_id,
                post_id,
            })
            .await?;
        info!(comment_id = comment.id, post_id, "comment created");
        Ok(comment)
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let comment = self
            .repo
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;

        if comment.author.id != actor_user_id {
            return Err(DomainError::Forbidden("only the author can delete this comment"));
        }

        if !self.repo.delete_comment(comment_id).await? {
            return Err(DomainError::NotFound(format!("comment id: {comment_id}")));
        }
        info!(comment_id, post_id = comment.post_id, "comment deleted");
        Ok(())
    }
}
