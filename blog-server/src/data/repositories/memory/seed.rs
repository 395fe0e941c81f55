use chrono::{DateTime, Duration, Utc};

use super::store::{Tables, UserRecord};
use crate::domain::comment::Comment;
use crate::domain::post::Post;
use crate::domain::user::{Author, User};

const IMAGE_POSTS: i64 = 50;
const TEXT_POSTS: i64 = 20;

const CAROUSEL_IMAGE: &str = "https://cdn.builder.io/api/v1/image/assets%2Ff0814687c37c496a970fdefb6a24c7bf%2F65ece06449fd457695abcb19dacc53c5?format=webp&width=800";

const DEMO_USERS: [(&str, &str, &str, &str); 6] = [
    (
        "John Doe",
        "john@example.com",
        "Frontend Developer",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
    ),
    (
        "Jane Smith",
        "jane@example.com",
        "Full Stack Developer",
        "https://images.unsplash.com/photo-1494790108755-2616b612b1d5?w=150&h=150&fit=crop&crop=face",
    ),
    (
        "Mike Johnson",
        "mike@example.com",
        "UI/UX Designer",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
    ),
    (
        "Sarah Wilson",
        "sarah@example.com",
        "Backend Developer",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
    ),
    (
        "Jessica Jane",
        "jessica@example.com",
        "Product Designer",
        "https://images.unsplash.com/photo-1494790108755-2616b612b1d5?w=150&h=150&fit=crop&crop=face",
    ),
    (
        "Alexandra",
        "alexandra@example.com",
        "Frontend Developer",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
    ),
];

const CONTENT_VARIATIONS: [&str; 8] = [
    "Frontend development is more than just building beautiful user interfaces. It is about crafting user experiences that are fast, accessible, and intuitive.",
    "Modern web development requires a deep understanding of user experience principles, performance optimization, and accessibility standards.",
    "The landscape of frontend technologies is constantly evolving. Developers have more tools than ever to create amazing experiences.",
    "Building responsive, mobile-first applications has become the standard in modern web development. Understanding CSS Grid and Flexbox is essential.",
    "Performance optimization techniques like lazy loading, code splitting, and efficient state management can make or break user experience.",
    "Accessibility in web development is a requirement, not a nice-to-have. Creating inclusive experiences benefits everyone.",
    "Component-based architecture changed how we build scalable frontend applications and keep codebases clean.",
    "API integration and state management are crucial skills for developers working with complex, data-driven applications.",
];

const TAG_VARIATIONS: [[&str; 3]; 8] = [
    ["Programming", "Frontend", "Coding"],
    ["JavaScript", "React", "Development"],
    ["CSS", "Design", "UI/UX"],
    ["TypeScript", "Modern", "Web"],
    ["Performance", "Optimization", "Speed"],
    ["Accessibility", "Inclusive", "Design"],
    ["Architecture", "Components", "Scalable"],
    ["API", "State", "Management"],
];

const POST_ONE_COMMENTS: [(usize, &str); 5] = [
    (1, "This is super insightful, thanks for sharing!"),
    (2, "Exactly what I needed to read today. Frontend is evolving so fast!"),
    (3, "Great breakdown! You made complex ideas sound simple."),
    (4, "As a beginner in frontend, this motivates me a lot. Appreciate it!"),
    (5, "Well-written and straight to the point. Keep posting content like this!"),
];

/// Demo dataset: 6 users, 50 posts with images, 20 text-only posts and a
/// thread of comments under post 1. Comment counters match the comment rows.
pub(crate) fn demo_tables(now: DateTime<Utc>, password_hash: &str) -> Tables {
    let users: Vec<UserRecord> = DEMO_USERS
        .iter()
        .zip(1i64..)
        .map(|(&(name, email, headline, avatar), id)| UserRecord {
            user: User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                headline: Some(headline.to_string()),
                avatar_url: Some(avatar.to_string()),
            },
            password_hash: password_hash.to_string(),
        })
        .collect();

    let mut posts: Vec<Post> = (1..=IMAGE_POSTS + TEXT_POSTS)
        .map(|id| demo_post(id, now, &users))
        .collect();

    let comments: Vec<Comment> = POST_ONE_COMMENTS
        .iter()
        .zip(1i64..)
        .map(|(&(user_idx, content), id)| Comment {
            id,
            content: content.to_string(),
            author: Author::from(&users[user_idx].user),
            created_at: now - Duration::minutes(50 - 10 * id),
            post_id: 1,
        })
        .collect();

    for post in &mut posts {
        post.comments = comments
            .iter()
            .filter(|comment| comment.post_id == post.id)
            .count() as u64;
    }

    Tables::new(users, posts, comments)
}

fn demo_post(id: i64, now: DateTime<Utc>, users: &[UserRecord]) -> Post {
    let variation = ((id - 1) % CONTENT_VARIATIONS.len() as i64) as usize;
    let author = &users[((id - 1) % users.len() as i64) as usize].user;
    let with_image = id <= IMAGE_POSTS;

    let (title, image_url, likes) = if with_image {
        (
            format!("5 Reasons to Learn Frontend Development in 2025 Post{id}"),
            Some(CAROUSEL_IMAGE.to_string()),
            10 + (id * 17 % 51) as u64,
        )
    } else {
        (
            "5 Reasons to Learn Frontend Development in 2025".to_string(),
            None,
            40 + (id * 29 % 81) as u64,
        )
    };

    Post {
        id,
        title,
        content: CONTENT_VARIATIONS[variation].to_string(),
        tags: TAG_VARIATIONS[variation]
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
        image_url,
        author: Author::from(author),
        created_at: now - Duration::hours(id),
        likes,
        comments: 0,
        published: true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{IMAGE_POSTS, TEXT_POSTS, demo_tables};

    #[test]
    fn demo_tables_have_expected_shape() {
        let tables = demo_tables(Utc::now(), "hash");

        assert_eq!(tables.users.len(), 6);
        assert_eq!(tables.posts.len() as i64, IMAGE_POSTS + TEXT_POSTS);
        assert_eq!(
            tables
                .posts
                .iter()
                .filter(|post| post.image_url.is_some())
                .count() as i64,
            IMAGE_POSTS
        );
        assert!(tables.users.iter().all(|u| u.password_hash == "hash"));
    }

    #[test]
    fn demo_comment_counters_mirror_comment_rows() {
        let tables = demo_tables(Utc::now(), "hash");

        for post in &tables.posts {
            let live = tables
                .comments
                .iter()
                .filter(|comment| comment.post_id == post.id)
                .count() as u64;
            assert_eq!(post.comments, live, "post {}", post.id);
        }
        assert_eq!(tables.post(1).map(|post| post.comments), Some(5));
    }

    #[test]
    fn demo_posts_are_ordered_newest_first() {
        let tables = demo_tables(Utc::now(), "hash");
        assert!(
            tables
                .posts
                .windows(2)
                .all(|pair| pair[0].created_at > pair[1].created_at)
        );
    }

    #[test]
    fn demo_comments_are_newer_than_their_post() {
        let tables = demo_tables(Utc::now(), "hash");
        let post = tables.post(1).expect("post 1 is seeded");
        assert!(
            tables
                .comments
                .iter()
                .all(|comment| comment.created_at > post.created_at)
        );
    }
}
