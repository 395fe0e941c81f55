use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: User,
    pub created_at: String,
    pub likes: u64,
    pub comments: u64,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: User,
    pub created_at: String,
    pub post_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub data: Vec<Post>,
    pub total: u64,
    pub page: u32,
    pub last_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{"message": ..., "errors"?: {field: [..]}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: std::collections::BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    pub fn describe(&self) -> String {
        match self.errors.values().flatten().next() {
            Some(first) => format!("{}: {first}", self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Поля поста; при обновлении пустые поля не отправляются.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_reads_camel_case_fields() {
        let raw = r#"{
            "id": 1,
            "title": "t",
            "content": "c",
            "tags": ["rust"],
            "imageUrl": "data:image/png;base64,AAAA",
            "author": {"id": 2, "name": "Jane", "email": "jane@example.com", "avatarUrl": "https://a"},
            "createdAt": "2026-01-01T00:00:00Z",
            "likes": 3,
            "comments": 1,
            "published": true
        }"#;

        let post: Post = serde_json::from_str(raw).expect("post should parse");
        assert_eq!(post.author.avatar_url.as_deref(), Some("https://a"));
        assert_eq!(post.image_url.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn post_payload_skips_empty_fields() {
        let payload = PostPayload {
            title: Some("New".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&payload).expect("serializable");
        assert_eq!(json, r#"{"title":"New"}"#);
    }

    #[test]
    fn error_body_prefers_first_field_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"Validation error","errors":{"email":["Invalid email format"]}}"#,
        )
        .expect("error body should parse");
        assert_eq!(body.describe(), "Validation error: Invalid email format");

        let plain: ErrorBody =
            serde_json::from_str(r#"{"message":"Not found"}"#).expect("error body should parse");
        assert_eq!(plain.describe(), "Not found");
    }
}
