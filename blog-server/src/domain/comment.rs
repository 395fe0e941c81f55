use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::user::Author;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) author: Author,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) post_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation {
                field: "content",
                message: "comment content is required",
            });
        }
        if content.chars().count() > 1000 {
            return Err(DomainError::Validation {
                field: "content",
                message: "comment too long",
            });
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateCommentRequest, DomainError};

    #[test]
    fn create_comment_request_trims_content() {
        let req = CreateCommentRequest {
            content: "  nice post  ".to_string(),
        };
        assert_eq!(req.validate().expect("valid").content, "nice post");
    }

    #[test]
    fn create_comment_request_rejects_blank_and_too_long() {
        let blank = CreateCommentRequest {
            content: " \n ".to_string(),
        };
        assert!(matches!(
            blank.validate(),
            Err(DomainError::Validation { field: "content", .. })
        ));

        let long = CreateCommentRequest {
            content: "a".repeat(1001),
        };
        assert!(matches!(
            long.validate(),
            Err(DomainError::Validation { field: "content", .. })
        ));
    }
}
