use leptos::prelude::*;

use crate::api::ApiError;
use crate::cache::{Mutation, QueryCache, QueryKey};
use crate::models::{AuthResponse, User};
use crate::storage;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) token: RwSignal<Option<String>>,
    pub(crate) user: RwSignal<Option<User>>,
    pub(crate) error: RwSignal<Option<String>>,
    pub(crate) loading: RwSignal<bool>,
    pub(crate) cache: RwSignal<QueryCache>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            token: RwSignal::new(storage::load_token()),
            user: RwSignal::new(storage::load_user()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            cache: RwSignal::new(QueryCache::default()),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub(crate) fn current_user_id(&self) -> Option<i64> {
        self.user.with(|user| user.as_ref().map(|u| u.id))
    }

    /// Поколение ключа; чтение подписывает текущий `Effect` на инвалидацию.
    pub(crate) fn generation(&self, key: &QueryKey) -> u64 {
        self.cache.with(|cache| cache.generation(key))
    }

    pub(crate) fn invalidate(&self, mutation: Mutation) {
        self.cache.update(|cache| cache.invalidate(mutation));
    }

    pub(crate) fn sign_in(&self, auth: AuthResponse) {
        if let Err(err) = storage::save_token(&auth.token).and_then(|_| storage::save_user(&auth.user)) {
            self.set_error(err);
            return;
        }
        self.token.set(Some(auth.token));
        self.user.set(Some(auth.user));
        self.clear_error();
        self.invalidate(Mutation::SignedIn);
    }

    pub(crate) fn sign_out(&self) {
        if let Err(err) = storage::clear_token().and_then(|_| storage::clear_user()) {
            self.set_error(err);
        }
        self.token.set(None);
        self.user.set(None);
        self.invalidate(Mutation::SignedOut);
    }

    pub(crate) fn set_user(&self, user: User) {
        if let Err(err) = storage::save_user(&user) {
            self.set_error(err);
        }
        self.user.set(Some(user));
    }

    /// Общая обработка ошибок API: истёкший токен сбрасывает сессию.
    pub(crate) fn report(&self, err: ApiError) {
        if err.is_unauthorized() && self.token.get_untracked().is_some() {
            self.sign_out();
        }
        self.set_error(err.to_string());
    }
}
