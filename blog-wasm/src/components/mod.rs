pub(crate) mod auth_panel;
pub(crate) mod comments_panel;
pub(crate) mod posts_panel;
pub(crate) mod profile_panel;
