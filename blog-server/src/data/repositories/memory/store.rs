use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::comment::Comment;
use crate::domain::post::Post;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

/// Все коллекции процесса. Живут до рестарта.
#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) users: Vec<UserRecord>,
    pub(crate) posts: Vec<Post>,
    pub(crate) comments: Vec<Comment>,
    next_user_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
}

impl Tables {
    pub(crate) fn new(users: Vec<UserRecord>, posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        let next_user_id = next_id(users.iter().map(|record| record.user.id));
        let next_post_id = next_id(posts.iter().map(|post| post.id));
        let next_comment_id = next_id(comments.iter().map(|comment| comment.id));

        Self {
            users,
            posts,
            comments,
            next_user_id,
            next_post_id,
            next_comment_id,
        }
    }

    pub(crate) fn allocate_user_id(&mut self) -> i64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    pub(crate) fn allocate_post_id(&mut self) -> i64 {
        let id = self.next_post_id;
        self.next_post_id += 1;
        id
    }

    pub(crate) fn allocate_comment_id(&mut self) -> i64 {
        let id = self.next_comment_id;
        self.next_comment_id += 1;
        id
    }

    pub(crate) fn user(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|record| record.user.id == id)
    }

    pub(crate) fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|record| record.user.email.eq_ignore_ascii_case(email))
    }

    pub(crate) fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub(crate) fn post_mut(&mut self, id: i64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == id)
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// Shared handle to the in-memory tables, cloned into every repository.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_tables(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
