//! Ключи запросов и правила инвалидации после мутаций.
//!
//! Каждый запрос компонента помечен `QueryKey`. Мутация сообщает, какие
//! ключи она делает устаревшими, а `QueryCache` увеличивает их поколение.
//! Компонент читает поколение своего ключа внутри `Effect` и перезапрашивает
//! данные, когда оно меняется.

use std::collections::HashMap;

/// Лента постов: режим выдачи.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feed {
    Latest,
    Likes,
    Recommended,
    MostLiked,
    Mine,
    Search(String),
    ByUser(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Posts(Feed),
    Post(i64),
    Comments(i64),
    Profile,
    User(i64),
    Users,
}

/// Все ленты устаревают вместе, остальные ключи по отдельности.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scope {
    PostLists,
    Post(i64),
    Comments(i64),
    Profile,
    User(i64),
    Users,
}

impl QueryKey {
    fn scope(&self) -> Scope {
        match self {
            QueryKey::Posts(_) => Scope::PostLists,
            QueryKey::Post(id) => Scope::Post(*id),
            QueryKey::Comments(post_id) => Scope::Comments(*post_id),
            QueryKey::Profile => Scope::Profile,
            QueryKey::User(id) => Scope::User(*id),
            QueryKey::Users => Scope::Users,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    SignedIn,
    SignedOut,
    CreatePost,
    UpdatePost { post_id: i64 },
    DeletePost { post_id: i64 },
    LikePost { post_id: i64 },
    CreateComment { post_id: i64 },
    DeleteComment { post_id: i64 },
    UpdateProfile { user_id: i64 },
}

impl Mutation {
    fn scopes(self) -> Vec<Scope> {
        match self {
            // "мои посты" и профиль зависят от текущего пользователя
            Mutation::SignedIn | Mutation::SignedOut => vec![Scope::PostLists, Scope::Profile],
            Mutation::CreatePost => vec![Scope::PostLists],
            Mutation::UpdatePost { post_id } | Mutation::LikePost { post_id } => {
                vec![Scope::PostLists, Scope::Post(post_id)]
            }
            Mutation::DeletePost { post_id }
            | Mutation::CreateComment { post_id }
            | Mutation::DeleteComment { post_id } => vec![
                Scope::PostLists,
                Scope::Post(post_id),
                Scope::Comments(post_id),
            ],
            Mutation::UpdateProfile { user_id } => {
                vec![Scope::Profile, Scope::User(user_id), Scope::Users]
            }
        }
    }

    pub fn invalidates(self, key: &QueryKey) -> bool {
        self.scopes().contains(&key.scope())
    }
}

/// Поколения ключей. Значение меняется только при инвалидации.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCache {
    generations: HashMap<Scope, u64>,
}

impl QueryCache {
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(&key.scope()).copied().unwrap_or(0)
    }

    pub fn invalidate(&mut self, mutation: Mutation) {
        for scope in mutation.scopes() {
            *self.generations.entry(scope).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_refreshes_lists_and_post_but_not_comments() {
        let like = Mutation::LikePost { post_id: 7 };

        assert!(like.invalidates(&QueryKey::Posts(Feed::Latest)));
        assert!(like.invalidates(&QueryKey::Posts(Feed::Search("rust".into()))));
        assert!(like.invalidates(&QueryKey::Post(7)));
        assert!(!like.invalidates(&QueryKey::Post(8)));
        assert!(!like.invalidates(&QueryKey::Comments(7)));
    }

    #[test]
    fn comment_changes_refresh_comment_list_lists_and_post() {
        for mutation in [
            Mutation::CreateComment { post_id: 3 },
            Mutation::DeleteComment { post_id: 3 },
        ] {
            assert!(mutation.invalidates(&QueryKey::Comments(3)));
            assert!(mutation.invalidates(&QueryKey::Post(3)));
            assert!(mutation.invalidates(&QueryKey::Posts(Feed::MostLiked)));
            assert!(!mutation.invalidates(&QueryKey::Comments(4)));
            assert!(!mutation.invalidates(&QueryKey::Profile));
        }
    }

    #[test]
    fn profile_update_touches_only_user_views() {
        let update = Mutation::UpdateProfile { user_id: 1 };

        assert!(update.invalidates(&QueryKey::Profile));
        assert!(update.invalidates(&QueryKey::User(1)));
        assert!(!update.invalidates(&QueryKey::User(2)));
        assert!(!update.invalidates(&QueryKey::Posts(Feed::Latest)));
    }

    #[test]
    fn create_post_refreshes_every_feed() {
        let create = Mutation::CreatePost;
        assert!(create.invalidates(&QueryKey::Posts(Feed::Mine)));
        assert!(create.invalidates(&QueryKey::Posts(Feed::ByUser(5))));
        assert!(!create.invalidates(&QueryKey::Post(1)));
    }

    #[test]
    fn generations_move_only_for_invalidated_keys() {
        let mut cache = QueryCache::default();
        let feed = QueryKey::Posts(Feed::Recommended);
        let comments = QueryKey::Comments(2);
        assert_eq!(cache.generation(&feed), 0);

        cache.invalidate(Mutation::LikePost { post_id: 2 });
        assert_eq!(cache.generation(&feed), 1);
        assert_eq!(cache.generation(&comments), 0);

        cache.invalidate(Mutation::CreateComment { post_id: 2 });
        assert_eq!(cache.generation(&feed), 2);
        assert_eq!(cache.generation(&comments), 1);
        assert_eq!(cache.generation(&QueryKey::Post(2)), 2);
    }
}
