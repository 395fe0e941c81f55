use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::user::Author;

pub(crate) const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) tags: Vec<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) author: Author,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) likes: u64,
    pub(crate) comments: u64,
    pub(crate) published: bool,
}

impl Post {
    pub(crate) fn is_owned_by(&self, user_id: i64) -> bool {
        self.author.id == user_id
    }

    /// Case-insensitive substring match over title, content and tags.
    /// `needle` must already be lower-cased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum PostSort {
    #[default]
    Latest,
    Likes,
}

impl PostSort {
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("likes") => Self::Likes,
            _ => Self::Latest,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) tags: Vec<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) published: bool,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            tags: normalize_tags(self.tags),
            image_url: normalize_image_url(self.image_url),
            published: self.published,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) image_url: Option<String>,
    pub(crate) published: Option<bool>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self.title.as_deref().map(normalize_title).transpose()?,
            content: self.content.as_deref().map(normalize_content).transpose()?,
            tags: self.tags.map(normalize_tags),
            image_url: normalize_image_url(self.image_url),
            published: self.published,
        })
    }
}

/// Splits a comma separated tag list: `"rust, axum,,"` -> `["rust", "axum"]`.
pub(crate) fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn normalize_image_url(image_url: Option<String>) -> Option<String> {
    image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..200 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "content is required",
        });
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CreatePostRequest, DomainError, Post, PostSort, UpdatePostRequest, parse_tags};
    use crate::domain::user::Author;

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            tags: Vec::new(),
            image_url: None,
            published: true,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_validate_rejects_long_title() {
        let req = CreatePostRequest {
            title: "t".repeat(201),
            content: "valid content".to_string(),
            tags: Vec::new(),
            image_url: None,
            published: true,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn update_post_request_validate_rejects_blank_content() {
        let req = UpdatePostRequest {
            content: Some("   ".to_string()),
            ..Default::default()
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn create_post_request_validate_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            tags: vec![" x ".to_string(), "".to_string(), "y".to_string()],
            image_url: Some("   ".to_string()),
            published: false,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert_eq!(validated.tags, vec!["x", "y"]);
        assert!(validated.image_url.is_none());
        assert!(!validated.published);
    }

    #[test]
    fn parse_tags_splits_trims_and_drops_blanks() {
        assert_eq!(parse_tags("rust, axum ,, web "), vec!["rust", "axum", "web"]);
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn post_matches_title_content_or_tag_case_insensitively() {
        let post = sample_post("Learning Rust", "Ownership and borrowing", &["Systems"]);

        assert!(post.matches("rust"));
        assert!(post.matches("borrow"));
        assert!(post.matches("system"));
        assert!(!post.matches("python"));
    }

    #[test]
    fn post_sort_parse_defaults_to_latest() {
        assert_eq!(PostSort::parse(Some("likes")), PostSort::Likes);
        assert_eq!(PostSort::parse(Some("latest")), PostSort::Latest);
        assert_eq!(PostSort::parse(Some("whatever")), PostSort::Latest);
        assert_eq!(PostSort::parse(None), PostSort::Latest);
    }

    fn sample_post(title: &str, content: &str, tags: &[&str]) -> Post {
        Post {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            image_url: None,
            author: Author {
                id: 1,
                name: "John".to_string(),
                email: "john@example.com".to_string(),
                headline: None,
                avatar_url: None,
            },
            created_at: Utc::now(),
            likes: 0,
            comments: 0,
            published: true,
        }
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
