use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request, multipart::Field},
    http::header::CONTENT_TYPE,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest, parse_tags};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

/// `Json`, но ошибки разбора отдаются в нашем формате.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub(crate) struct ApiJson<T>(pub(crate) T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub(crate) struct ApiPath<T>(pub(crate) T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub(crate) struct ApiQuery<T>(pub(crate) T);

/// Tags arrive either as a JSON array or as one comma separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => tags,
            TagsInput::Csv(raw) => parse_tags(&raw),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostBodyDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub(crate) tags: Option<TagsInput>,
    #[serde(alias = "image_url")]
    pub(crate) image_url: Option<String>,
    pub(crate) published: Option<bool>,
}

/// Post fields from either `application/json` or `multipart/form-data`.
/// An uploaded `image` file wins over an `imageUrl` field.
#[derive(Debug, Default)]
pub(crate) struct PostForm {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) image_url: Option<String>,
    pub(crate) published: Option<bool>,
}

impl PostForm {
    pub(crate) fn into_create(self) -> CreatePostRequest {
        CreatePostRequest {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            image_url: self.image_url,
            published: self.published.unwrap_or(true),
        }
    }

    pub(crate) fn into_update(self) -> UpdatePostRequest {
        UpdatePostRequest {
            title: self.title,
            content: self.content,
            tags: self.tags,
            image_url: self.image_url,
            published: self.published,
        }
    }
}

impl From<PostBodyDto> for PostForm {
    fn from(dto: PostBodyDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            tags: dto.tags.map(TagsInput::into_vec),
            image_url: dto.image_url,
            published: dto.published,
        }
    }
}

impl FromRequest<AppState> for PostForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| {
                value
                    .to_ascii_lowercase()
                    .starts_with("multipart/form-data")
            });

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await?;
            return read_multipart(multipart, state.max_image_bytes).await;
        }

        let ApiJson(body) = ApiJson::<PostBodyDto>::from_request(req, state).await?;
        Ok(body.into())
    }
}

async fn read_multipart(mut multipart: Multipart, max_image_bytes: usize) -> Result<PostForm, AppError> {
    let mut form = PostForm::default();
    let mut uploaded = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => uploaded = image_data_url(field, max_image_bytes).await?,
            "title" => form.title = Some(field.text().await?),
            "content" => form.content = Some(field.text().await?),
            "tags" => form.tags = Some(parse_tags(&field.text().await?)),
            "imageUrl" | "image_url" => form.image_url = Some(field.text().await?),
            "published" => form.published = Some(parse_flag(&field.text().await?)?),
            _ => {}
        }
    }

    if uploaded.is_some() {
        form.image_url = uploaded;
    }
    Ok(form)
}

async fn image_data_url(field: Field<'_>, max_bytes: usize) -> Result<Option<String>, AppError> {
    let mime = field.content_type().unwrap_or_default().to_ascii_lowercase();
    let bytes = field.bytes().await?;
    // браузер шлёт пустую часть, если файл не выбран
    if bytes.is_empty() {
        return Ok(None);
    }

    if !mime.starts_with("image/") {
        return Err(DomainError::Validation {
            field: "image",
            message: "only image files are allowed",
        }
        .into());
    }
    if bytes.len() > max_bytes {
        return Err(DomainError::Validation {
            field: "image",
            message: "image is too large",
        }
        .into());
    }

    Ok(Some(format!("data:{mime};base64,{}", STANDARD.encode(&bytes))))
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" | "" => Ok(false),
        _ => Err(DomainError::Validation {
            field: "published",
            message: "must be a boolean",
        }
        .into()),
    }
}
