use web_sys::Storage;

use crate::models::User;

const TOKEN_KEY: &str = "blog_token";
const USER_KEY: &str = "blog_user";

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn parse_user(raw: &str) -> Option<User> {
    serde_json::from_str::<User>(raw).ok()
}

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

fn load_item(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok()?
}

pub(crate) fn load_token() -> Option<String> {
    parse_token(&load_item(TOKEN_KEY)?)
}

pub(crate) fn save_token(token: &str) -> Result<(), String> {
    local_storage()?
        .set_item(TOKEN_KEY, token)
        .map_err(|_| "failed to save token".to_string())
}

pub(crate) fn clear_token() -> Result<(), String> {
    local_storage()?
        .remove_item(TOKEN_KEY)
        .map_err(|_| "failed to clear token".to_string())
}

pub(crate) fn load_user() -> Option<User> {
    parse_user(&load_item(USER_KEY)?)
}

pub(crate) fn save_user(user: &User) -> Result<(), String> {
    let raw = serde_json::to_string(user).map_err(|_| "failed to serialize user".to_string())?;
    local_storage()?
        .set_item(USER_KEY, &raw)
        .map_err(|_| "failed to save user".to_string())
}

pub(crate) fn clear_user() -> Result<(), String> {
    local_storage()?
        .remove_item(USER_KEY)
        .map_err(|_| "failed to clear user".to_string())
}
