//! Клиентская библиотека для работы с blog-server по HTTP.
//!
//! `BlogClient` покрывает весь REST API: авторизацию, ленты постов,
//! комментарии и профиль. Клиент хранит JWT-токен после
//! `register`/`login` и автоматически использует его в защищённых операциях.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{
    AuthResponse, Author, Comment, Message, PageRequest, Post, PostInput, PostSort, PostsPage,
    ProfileUpdate, User,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент REST API блога.
pub struct BlogClient {
    http: HttpClient,
    token: Option<String>,
}

impl BlogClient {
    /// Создаёт клиент для сервера по базовому URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> BlogClientResult<AuthResponse> {
        let result = self
            .http
            .register(name, email, password, password_confirmation)
            .await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Выполняет вход пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, email: &str, password: &str) -> BlogClientResult<AuthResponse> {
        let result = self.http.login(email, password).await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Текущий пользователь по токену.
    pub async fn me(&self) -> BlogClientResult<User> {
        self.http.me(self.require_token()?).await
    }

    /// Сообщает серверу о выходе и забывает токен.
    ///
    /// Токен остаётся валидным до истечения срока: сервер его не отзывает.
    pub async fn logout(&mut self) -> BlogClientResult<Message> {
        let result = self.http.logout(self.token.as_deref()).await;
        self.token = None;
        result
    }

    /// Основная лента: новые сверху или по лайкам.
    pub async fn list_posts(
        &self,
        page: PageRequest,
        sort: PostSort,
    ) -> BlogClientResult<PostsPage> {
        self.http.list_posts(page, sort).await
    }

    /// Рекомендованные посты (с картинками).
    pub async fn recommended_posts(&self, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.http.recommended_posts(page).await
    }

    /// Самые популярные текстовые посты.
    pub async fn most_liked_posts(&self, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.http.most_liked_posts(page).await
    }

    /// Посты текущего пользователя.
    ///
    /// Требует установленный JWT-токен.
    pub async fn my_posts(&self, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.http.my_posts(self.require_token()?, page).await
    }

    /// Поиск по заголовку, тексту и тегам без учёта регистра.
    pub async fn search_posts(&self, query: &str, page: PageRequest) -> BlogClientResult<PostsPage> {
        self.http.search_posts(query, page).await
    }

    /// Посты указанного автора.
    pub async fn posts_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> BlogClientResult<PostsPage> {
        self.http.posts_by_user(user_id, page).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        self.http.get_post(id).await
    }

    /// Создаёт новый пост.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_post(&self, input: &PostInput) -> BlogClientResult<Post> {
        self.http.create_post(self.require_token()?, input).await
    }

    /// Частично обновляет пост; менять можно только свои посты.
    ///
    /// Требует установленный JWT-токен.
    pub async fn update_post(&self, id: i64, input: &PostInput) -> BlogClientResult<Post> {
        self.http.update_post(self.require_token()?, id, input).await
    }

    /// Удаляет пост вместе с комментариями.
    ///
    /// Требует установленный JWT-токен.
    pub async fn delete_post(&self, id: i64) -> BlogClientResult<Message> {
        self.http.delete_post(self.require_token()?, id).await
    }

    /// Ставит лайк. Токен отправляется, если он есть.
    pub async fn like_post(&self, id: i64) -> BlogClientResult<Post> {
        self.http.like_post(self.token.as_deref(), id).await
    }

    /// Комментарии к посту, от старых к новым.
    pub async fn list_comments(&self, post_id: i64) -> BlogClientResult<Vec<Comment>> {
        self.http.list_comments(post_id).await
    }

    /// Добавляет комментарий к посту.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_comment(&self, post_id: i64, content: &str) -> BlogClientResult<Comment> {
        self.http
            .create_comment(self.require_token()?, post_id, content)
            .await
    }

    /// Удаляет свой комментарий.
    ///
    /// Требует установленный JWT-токен.
    pub async fn delete_comment(&self, id: i64) -> BlogClientResult<Message> {
        self.http.delete_comment(self.require_token()?, id).await
    }

    /// Все пользователи.
    pub async fn list_users(&self) -> BlogClientResult<Vec<User>> {
        self.http.list_users().await
    }

    /// Пользователь по идентификатору.
    pub async fn get_user(&self, id: i64) -> BlogClientResult<User> {
        self.http.get_user(id).await
    }

    /// Профиль текущего пользователя.
    ///
    /// Требует установленный JWT-токен.
    pub async fn profile(&self) -> BlogClientResult<User> {
        self.http.profile(self.require_token()?).await
    }

    /// Обновляет профиль текущего пользователя.
    ///
    /// Требует установленный JWT-токен.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> BlogClientResult<User> {
        self.http
            .update_profile(self.require_token()?, update)
            .await
    }

    fn require_token(&self) -> BlogClientResult<&str> {
        self.token.as_deref().ok_or(BlogClientError::Unauthorized)
    }
}
