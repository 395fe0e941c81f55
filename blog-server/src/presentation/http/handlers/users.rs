use axum::{Json, extract::State};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::auth::UserDto;
use crate::domain::user::UpdateProfileRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{ApiJson, ApiPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100))]
    pub(crate) name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub(crate) email: Option<String>,
    #[validate(length(max = 200))]
    pub(crate) headline: Option<String>,
    #[serde(alias = "avatar_url")]
    pub(crate) avatar_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [UserDto])
    )
)]
pub(crate) async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile of the caller", body = UserDto),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get_user(auth.user_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/api/users/profile",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already taken")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<UpdateProfileDto>,
) -> AppResult<Json<UserDto>> {
    dto.validate()?;

    let req = UpdateProfileRequest {
        name: dto.name,
        email: dto.email,
        headline: dto.headline,
        avatar_url: dto.avatar_url,
    };
    let user = state
        .user_service
        .update_profile(auth.user_id, req)
        .await?;
    Ok(Json(user.into()))
}
