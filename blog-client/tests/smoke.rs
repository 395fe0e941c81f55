use std::time::{SystemTime, UNIX_EPOCH};

use blog_client::{BlogClient, BlogClientError, PageRequest, PostInput, PostSort, ProfileUpdate};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn client() -> BlogClient {
    let base_url =
        std::env::var("BLOG_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    BlogClient::new(base_url).expect("client must build")
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_smoke_flow() {
    let mut client = client();

    let suffix = unique_suffix();
    let name = format!("http_user_{suffix}");
    let email = format!("http_{suffix}@example.com");
    let password = "password123";

    let register = client
        .register(&name, &email, password, password)
        .await
        .expect("register must succeed");
    assert!(!register.token.is_empty());
    assert_eq!(register.user.name, name);
    assert!(client.get_token().is_some());

    let duplicate = client.register(&name, &email, password, password).await;
    assert!(matches!(duplicate, Err(BlogClientError::Conflict(_))));

    let login = client
        .login(&email, password)
        .await
        .expect("login must succeed");
    assert_eq!(login.user.id, register.user.id);

    let created = client
        .create_post(&PostInput {
            title: Some("http title".to_string()),
            content: Some("http content".to_string()),
            tags: Some(vec!["x".to_string(), "y".to_string()]),
            ..Default::default()
        })
        .await
        .expect("create_post must succeed");
    assert_eq!(created.tags, vec!["x", "y"]);
    assert_eq!(created.likes, 0);

    let fetched = client
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched, created);

    let liked = client.like_post(created.id).await.expect("like must succeed");
    assert_eq!(liked.likes, 1);

    let listed = client
        .list_posts(PageRequest::new(1, 20), PostSort::Latest)
        .await
        .expect("list_posts must succeed");
    assert!(listed.data.iter().any(|post| post.id == created.id));

    let comment = client
        .create_comment(created.id, "first")
        .await
        .expect("comment must succeed");
    assert_eq!(
        client.get_post(created.id).await.expect("get").comments,
        1
    );
    client
        .delete_comment(comment.id)
        .await
        .expect("delete_comment must succeed");

    let updated = client
        .update_post(
            created.id,
            &PostInput {
                title: Some("http title updated".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.title, "http title updated");
    assert_eq!(updated.content, "http content");

    let profile = client
        .update_profile(&ProfileUpdate {
            headline: Some("Smoke tester".to_string()),
            ..Default::default()
        })
        .await
        .expect("update_profile must succeed");
    assert_eq!(profile.headline.as_deref(), Some("Smoke tester"));

    client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(BlogClientError::NotFound)));

    client.logout().await.expect("logout must succeed");
    assert!(client.get_token().is_none());
}

#[tokio::test]
#[ignore = "requires running HTTP server with demo data"]
async fn foreign_post_is_forbidden() {
    let mut client = client();
    let suffix = unique_suffix();
    client
        .register("intruder", &format!("intruder_{suffix}@example.com"), "secret1", "secret1")
        .await
        .expect("register must succeed");

    let result = client
        .update_post(
            1,
            &PostInput {
                title: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BlogClientError::Forbidden(_))));
}
