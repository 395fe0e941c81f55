use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Отображаемое имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Короткое описание профиля.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Ссылка на аватар.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Снимок автора, встроенный в пост или комментарий.
pub type Author = User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Теги в порядке, заданном автором.
    #[serde(default)]
    pub tags: Vec<String>,
    /// URL картинки или `data:` URL загруженного файла.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Автор поста.
    pub author: Author,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Количество лайков.
    pub likes: u64,
    /// Количество комментариев.
    pub comments: u64,
    /// Признак публикации.
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Текст комментария.
    pub content: String,
    /// Автор комментария.
    pub author: Author,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Пост, к которому относится комментарий.
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Страница постов.
pub struct PostsPage {
    /// Посты текущей страницы.
    pub data: Vec<Post>,
    /// Общее количество постов в выборке.
    pub total: u64,
    /// Номер текущей страницы (с 1).
    pub page: u32,
    /// Номер последней страницы.
    pub last_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// Данные пользователя.
    pub user: User,
    /// JWT access token.
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Подтверждение операции без полезной нагрузки (удаление, logout).
pub struct Message {
    /// Успех операции.
    pub success: bool,
    /// Текст для пользователя.
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default)]
/// Параметры пагинации. Пустые поля оставляют значения сервера по умолчанию.
pub struct PageRequest {
    /// Номер страницы (с 1).
    pub page: Option<u32>,
    /// Размер страницы (1..=100).
    pub limit: Option<u32>,
}

impl PageRequest {
    /// Страница `page` размером `limit`.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Порядок основной ленты.
pub enum PostSort {
    /// Сначала новые.
    #[default]
    Latest,
    /// Сначала с наибольшим числом лайков.
    Likes,
}

impl PostSort {
    pub(crate) fn as_query(self) -> Option<&'static str> {
        match self {
            PostSort::Latest => None,
            PostSort::Likes => Some("likes"),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Поля поста для создания или частичного обновления.
///
/// При обновлении отправляются только заполненные поля. Если задан
/// `image_path`, запрос уходит как `multipart/form-data` и файл
/// имеет приоритет над `image_url`.
pub struct PostInput {
    /// Заголовок.
    pub title: Option<String>,
    /// Текст.
    pub content: Option<String>,
    /// Теги.
    pub tags: Option<Vec<String>>,
    /// Внешний URL картинки.
    pub image_url: Option<String>,
    /// Локальный файл картинки для загрузки.
    pub image_path: Option<PathBuf>,
    /// Признак публикации.
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Изменения профиля; `None` оставляет поле как есть.
pub struct ProfileUpdate {
    /// Новое имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Новый email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Новый headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Новая ссылка на аватар.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
