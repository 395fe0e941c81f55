use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::comment_service::CommentService;
use crate::application::user_service::UserService;
use crate::data::repositories::memory::comment_repository::MemoryCommentRepository;
use crate::data::repositories::memory::post_repository::MemoryPostRepository;
use crate::data::repositories::memory::store::MemoryStore;
use crate::data::repositories::memory::user_repository::MemoryUserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<MemoryUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<MemoryPostRepository>>,
    pub(crate) comment_service: Arc<CommentService<MemoryCommentRepository>>,
    pub(crate) user_service: Arc<UserService<MemoryUserRepository>>,
    pub(crate) max_image_bytes: usize,
}

impl AppState {
    /// Все репозитории смотрят в один и тот же `store`.
    pub(crate) fn new(
        store: MemoryStore,
        jwt: Arc<JwtService>,
        passwords: PasswordService,
        max_image_bytes: usize,
    ) -> Self {
        let users = MemoryUserRepository::new(store.clone());
        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), jwt, passwords)),
            blog_service: Arc::new(BlogService::new(MemoryPostRepository::new(store.clone()))),
            comment_service: Arc::new(CommentService::new(MemoryCommentRepository::new(store))),
            user_service: Arc::new(UserService::new(users)),
            max_image_bytes,
        }
    }
}
