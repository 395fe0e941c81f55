use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult, ErrorBody};
use crate::models::{
    AuthResponse, Comment, Message, PageRequest, Post, PostInput, PostSort, PostsPage,
    ProfileUpdate, User,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostBodyDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published: Option<bool>,
}

impl<'a> From<&'a PostInput> for PostBodyDto<'a> {
    fn from(input: &'a PostInput) -> Self {
        Self {
            title: input.title.as_deref(),
            content: input.content.as_deref(),
            tags: input.tags.as_deref(),
            image_url: input.image_url.as_deref(),
            published: input.published,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateCommentDto<'a> {
    content: &'a str,
}

#[derive(Debug, Default, Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

impl From<PageRequest> for ListQuery<'_> {
    fn from(page: PageRequest) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `blog-server`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub(crate) fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> BlogClientError {
        let status = response.status();
        let message = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(ErrorBody::describe),
            Err(_) => None,
        };
        BlogClientError::from_http_status(status, message)
    }

    /// отправляет готовый запрос и разбирает json-ответ
    async fn send<TRes>(&self, request: RequestBuilder) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    async fn get<TRes>(
        &self,
        path: &str,
        query: &ListQuery<'_>,
        token: Option<&str>,
    ) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        self.send(self.request(Method::GET, path, token).query(query))
            .await
    }

    /// JSON или multipart, если к посту прикладывается файл.
    async fn send_post_input(
        &self,
        method: Method,
        path: &str,
        token: &str,
        input: &PostInput,
    ) -> BlogClientResult<Post> {
        let request = self.request(method, path, Some(token));
        let request = match &input.image_path {
            Some(path) => request.multipart(post_form(input, path).await?),
            None => request.json(&PostBodyDto::from(input)),
        };
        self.send(request).await
    }

    pub(crate) async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> BlogClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            name,
            email,
            password,
            password_confirmation,
        };
        self.send(
            self.request(Method::POST, "/api/auth/register", None)
                .json(&payload),
        )
        .await
    }

    pub(crate) async fn login(&self, email: &str, password: &str) -> BlogClientResult<AuthResponse> {
        let payload = LoginRequestDto { email, password };
        self.send(self.request(Method::POST, "/api/auth/login", None).json(&payload))
            .await
    }

    pub(crate) async fn me(&self, token: &str) -> BlogClientResult<User> {
        self.get("/api/auth/me", &ListQuery::default(), Some(token))
            .await
    }

    pub(crate) async fn logout(&self, token: Option<&str>) -> BlogClientResult<Message> {
        self.send(self.request(Method::POST, "/api/auth/logout", token))
            .await
    }

    pub(crate) async fn list_posts(
        &self,
        page: PageRequest,
        sort: PostSort,
    ) -> BlogClientResult<PostsPage> {
        let query = ListQuery {
            sort: sort.as_query(),
            ..ListQuery::from(page)
        };
        self.get("/api/posts", &query, None).await
    }

    pub(crate) async fn recommended_posts(&self, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.get("/api/posts/recommended", &page.into(), None).await
    }

    pub(crate) async fn most_liked_posts(&self, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.get("/api/posts/most-liked", &page.into(), None).await
    }

    pub(crate) async fn my_posts(&self, token: &str, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.get("/api/posts/my-posts", &page.into(), Some(token))
            .await
    }

    pub(crate) async fn search_posts(
        &self,
        query: &str,
        page: PageRequest,
    ) -> BlogClientResult<PostsPage> {
        let query = ListQuery {
            query: Some(query),
            ..ListQuery::from(page)
        };
        self.get("/api/posts/search", &query, None).await
    }

    pub(crate) async fn posts_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> BlogClientResult<PostsPage> {
        self.get(&format!("/api/posts/by-user/{user_id}"), &page.into(), None)
            .await
    }

    pub(crate) async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        self.get(&format!("/api/posts/{id}"), &ListQuery::default(), None)
            .await
    }

    pub(crate) async fn create_post(&self, token: &str, input: &PostInput) -> BlogClientResult<Post> {
        self.send_post_input(Method::POST, "/api/posts", token, input)
            .await
    }

    pub(crate) async fn update_post(
        &self,
        token: &str,
        id: i64,
        input: &PostInput,
    ) -> BlogClientResult<Post> {
        self.send_post_input(Method::PATCH, &format!("/api/posts/{id}"), token, input)
            .await
    }

    pub(crate) async fn delete_post(&self, token: &str, id: i64) -> BlogClientResult<Message> {
        self.send(self.request(Method::DELETE, &format!("/api/posts/{id}"), Some(token)))
            .await
    }

    pub(crate) async fn like_post(&self, token: Option<&str>, id: i64) -> BlogClientResult<Post> {
        self.send(self.request(Method::POST, &format!("/api/posts/{id}/like"), token))
            .await
    }

    pub(crate) async fn list_comments(&self, post_id: i64) -> BlogClientResult<Vec<Comment>> {
        self.get(
            &format!("/api/posts/{post_id}/comments"),
            &ListQuery::default(),
            None,
        )
        .await
    }

    pub(crate) async fn create_comment(
        &self,
        token: &str,
        post_id: i64,
        content: &str,
    ) -> BlogClientResult<Comment> {
        self.send(
            self.request(
                Method::POST,
                &format!("/api/posts/{post_id}/comments"),
                Some(token),
            )
            .json(&CreateCommentDto { content }),
        )
        .await
    }

    pub(crate) async fn delete_comment(&self, token: &str, id: i64) -> BlogClientResult<Message> {
        self.send(self.request(Method::DELETE, &format!("/api/comments/{id}"), Some(token)))
            .await
    }

    pub(crate) async fn list_users(&self) -> BlogClientResult<Vec<User>> {
        self.get("/api/users", &ListQuery::default(), None).await
    }

    pub(crate) async fn get_user(&self, id: i64) -> BlogClientResult<User> {
        self.get(&format!("/api/users/{id}"), &ListQuery::default(), None)
            .await
    }

    pub(crate) async fn profile(&self, token: &str) -> BlogClientResult<User> {
        self.get("/api/users/profile", &ListQuery::default(), Some(token))
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> BlogClientResult<User> {
        self.send(
            self.request(Method::PATCH, "/api/users/profile", Some(token))
                .json(update),
        )
        .await
    }
}

async fn post_form(input: &PostInput, image_path: &Path) -> BlogClientResult<Form> {
    let mut form = Form::new();
    if let Some(title) = &input.title {
        form = form.text("title", title.clone());
    }
    if let Some(content) = &input.content {
        form = form.text("content", content.clone());
    }
    if let Some(tags) = &input.tags {
        form = form.text("tags", tags.join(","));
    }
    if let Some(published) = input.published {
        form = form.text("published", published.to_string());
    }

    let mime = image_mime(image_path).ok_or_else(|| {
        BlogClientError::InvalidRequest(format!(
            "unsupported image type: {}",
            image_path.display()
        ))
    })?;
    let file_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let bytes = tokio::fs::read(image_path).await?;
    let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;

    Ok(form.part("image", part))
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn post_body_sends_only_present_fields() {
        let input = PostInput {
            title: Some("Hello".to_string()),
            tags: Some(vec!["x".to_string(), "y".to_string()]),
            image_url: Some("https://img/1.png".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(PostBodyDto::from(&input)).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Hello",
                "tags": ["x", "y"],
                "imageUrl": "https://img/1.png"
            })
        );
    }

    #[test]
    fn image_mime_follows_extension() {
        assert_eq!(image_mime(Path::new("a/cat.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("dog.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn posts_page_reads_server_wire_format() {
        let page: PostsPage = serde_json::from_str(
            r#"{
                "data": [{
                    "id": 3,
                    "title": "t",
                    "content": "c",
                    "tags": ["rust"],
                    "author": {"id": 1, "name": "John Doe", "email": "john@example.com"},
                    "createdAt": "2025-01-01T10:00:00Z",
                    "likes": 4,
                    "comments": 2,
                    "published": true
                }],
                "total": 21,
                "page": 1,
                "lastPage": 3
            }"#,
        )
        .expect("valid page");

        assert_eq!(page.last_page, 3);
        assert_eq!(page.data[0].author.name, "John Doe");
        assert!(page.data[0].image_url.is_none());
    }

    #[tokio::test]
    async fn multipart_rejects_non_image_files_before_reading() {
        let input = PostInput {
            title: Some("t".to_string()),
            ..Default::default()
        };
        let err = post_form(&input, Path::new("/definitely/missing.txt"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, BlogClientError::InvalidRequest(_)));
    }
}
