use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use blog_client::{
    AuthResponse, BlogClient, BlogClientError, Comment, PageRequest, Post, PostInput, PostSort,
    PostsPage, ProfileUpdate, User,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

const TOKEN_FILE: &str = ".blog_token";
const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI клиент для blog-server")]
struct Cli {
    /// Адрес сервера. По умолчанию `BLOG_HTTP_URL` или http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать ответы сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Args)]
struct PageArgs {
    /// Номер страницы (с 1).
    #[arg(long)]
    page: Option<u32>,
    /// Размер страницы (1..=100).
    #[arg(long)]
    limit: Option<u32>,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest {
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    #[default]
    Latest,
    Likes,
}

impl From<SortArg> for PostSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Latest => PostSort::Latest,
            SortArg::Likes => PostSort::Likes,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Подтверждение пароля; по умолчанию совпадает с `--password`.
        #[arg(long)]
        password_confirmation: Option<String>,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённый токен.
    Logout,
    /// Текущий пользователь (требует токен).
    Me,
    /// Лента постов.
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, value_enum, default_value_t = SortArg::Latest)]
        sort: SortArg,
    },
    /// Рекомендованные посты.
    Recommended {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Самые популярные текстовые посты.
    MostLiked {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Мои посты (требует токен).
    MyPosts {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Поиск по заголовку, тексту и тегам.
    Search {
        #[arg(long)]
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Посты пользователя.
    ByUser {
        #[arg(long)]
        user_id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Теги через запятую.
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Локальный файл картинки; отправляется как multipart.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Создать черновик (published = false).
        #[arg(long)]
        draft: bool,
    },
    /// Частичное обновление поста (требует токен).
    ///
    /// Меняются только переданные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// Удаление поста (требует токен).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Лайк поста.
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Комментарии к посту.
    Comments {
        #[arg(long)]
        post_id: i64,
    },
    /// Новый комментарий (требует токен).
    Comment {
        #[arg(long)]
        post_id: i64,
        #[arg(long)]
        content: String,
    },
    /// Удаление своего комментария (требует токен).
    DeleteComment {
        #[arg(long)]
        id: i64,
    },
    /// Список пользователей.
    Users,
    /// Пользователь по id.
    User {
        #[arg(long)]
        id: i64,
    },
    /// Мой профиль (требует токен).
    Profile,
    /// Обновление профиля (требует токен).
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        headline: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var("BLOG_HTTP_URL").ok());
    let mut client = BlogClient::new(server).map_err(map_client_error)?;
    let out = Output { json: cli.json };

    if let Some(token) = load_token().context("не удалось прочитать .blog_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register {
            name,
            email,
            password,
            password_confirmation,
        } => {
            let confirmation = password_confirmation.unwrap_or_else(|| password.clone());
            let auth = client
                .register(&name, &email, &password, &confirmation)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            out.auth("Регистрация успешна", &auth)?;
        }
        Command::Login { email, password } => {
            let auth = client
                .login(&email, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            out.auth("Вход выполнен", &auth)?;
        }
        Command::Logout => {
            let message = client.logout().await.map_err(map_client_error)?;
            remove_token().context("не удалось удалить .blog_token")?;
            println!("{}", message.message);
        }
        Command::Me => {
            let user = client.me().await.map_err(map_client_error)?;
            out.user("Текущий пользователь", &user)?;
        }
        Command::List { page, sort } => {
            let list = client
                .list_posts(page.into(), sort.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::Recommended { page } => {
            let list = client
                .recommended_posts(page.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::MostLiked { page } => {
            let list = client
                .most_liked_posts(page.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::MyPosts { page } => {
            let list = client
                .my_posts(page.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::Search { query, page } => {
            let list = client
                .search_posts(&query, page.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::ByUser { user_id, page } => {
            let list = client
                .posts_by_user(user_id, page.into())
                .await
                .map_err(map_client_error)?;
            out.page(&list)?;
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            out.post("Пост", &post)?;
        }
        Command::Create {
            title,
            content,
            tags,
            image_url,
            image,
            draft,
        } => {
            let input = PostInput {
                title: Some(title),
                content: Some(content),
                tags: tags.as_deref().map(parse_tags),
                image_url,
                image_path: image,
                published: Some(!draft),
            };
            let post = client
                .create_post(&input)
                .await
                .map_err(map_client_error)?;
            out.post("Пост создан", &post)?;
        }
        Command::Update {
            id,
            title,
            content,
            tags,
            image_url,
            image,
            published,
        } => {
            let input = PostInput {
                title,
                content,
                tags: tags.as_deref().map(parse_tags),
                image_url,
                image_path: image,
                published,
            };
            let post = client
                .update_post(id, &input)
                .await
                .map_err(map_client_error)?;
            out.post("Пост обновлён", &post)?;
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::Like { id } => {
            let post = client.like_post(id).await.map_err(map_client_error)?;
            out.post("Лайк засчитан", &post)?;
        }
        Command::Comments { post_id } => {
            let comments = client
                .list_comments(post_id)
                .await
                .map_err(map_client_error)?;
            out.comments(&comments)?;
        }
        Command::Comment { post_id, content } => {
            let comment = client
                .create_comment(post_id, &content)
                .await
                .map_err(map_client_error)?;
            out.comments(std::slice::from_ref(&comment))?;
        }
        Command::DeleteComment { id } => {
            client.delete_comment(id).await.map_err(map_client_error)?;
            println!("Комментарий удалён: id={id}");
        }
        Command::Users => {
            let users = client.list_users().await.map_err(map_client_error)?;
            out.users(&users)?;
        }
        Command::User { id } => {
            let user = client.get_user(id).await.map_err(map_client_error)?;
            out.user("Пользователь", &user)?;
        }
        Command::Profile => {
            let user = client.profile().await.map_err(map_client_error)?;
            out.user("Профиль", &user)?;
        }
        Command::UpdateProfile {
            name,
            email,
            headline,
            avatar_url,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                headline,
                avatar_url,
            };
            let user = client
                .update_profile(&update)
                .await
                .map_err(map_client_error)?;
            out.user("Профиль обновлён", &user)?;
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &BlogClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    match fs::remove_file(TOKEN_FILE) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Unauthorized => {
            "требуется авторизация: выполните `blog-cli login ...` или `blog-cli register ...`"
                .to_string()
        }
        BlogClientError::Forbidden(message) => format!("доступ запрещён: {message}"),
        BlogClientError::NotFound => "ресурс не найден".to_string(),
        BlogClientError::Conflict(message) => format!("конфликт: {message}"),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Server { status, message } => {
            format!("ошибка сервера ({status}): {message}")
        }
        BlogClientError::Io(err) => format!("ошибка чтения файла: {err}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

/// Печать результатов: человекочитаемо или как JSON (`--json`).
struct Output {
    json: bool,
}

impl Output {
    fn json(&self, value: &impl Serialize) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }

    fn auth(&self, title: &str, auth: &AuthResponse) -> Result<()> {
        if self.json(auth)? {
            return Ok(());
        }
        println!("{title}");
        println!("token: {}", auth.token);
        print_user_fields(&auth.user);
        Ok(())
    }

    fn user(&self, title: &str, user: &User) -> Result<()> {
        if self.json(user)? {
            return Ok(());
        }
        println!("{title}");
        print_user_fields(user);
        Ok(())
    }

    fn users(&self, users: &[User]) -> Result<()> {
        if self.json(&users)? {
            return Ok(());
        }
        println!("Пользователей: {}", users.len());
        for user in users {
            println!("- [{}] {} <{}>", user.id, user.name, user.email);
        }
        Ok(())
    }

    fn post(&self, title: &str, post: &Post) -> Result<()> {
        if self.json(post)? {
            return Ok(());
        }
        println!("{title}");
        println!("id: {}", post.id);
        println!("title: {}", post.title);
        println!("content: {}", post.content);
        println!("tags: {}", post.tags.join(", "));
        if let Some(image_url) = &post.image_url {
            println!("image: {}", shorten(image_url, 80));
        }
        println!("author: {} (id={})", post.author.name, post.author.id);
        println!("created_at: {}", post.created_at);
        println!("likes: {}, comments: {}", post.likes, post.comments);
        println!("published: {}", post.published);
        Ok(())
    }

    fn page(&self, list: &PostsPage) -> Result<()> {
        if self.json(list)? {
            return Ok(());
        }
        println!(
            "Постов: {} (страница {}/{}, всего {})",
            list.data.len(),
            list.page,
            list.last_page,
            list.total
        );
        for post in &list.data {
            println!(
                "- [{}] {} ({}, ♥ {}, комментариев {})",
                post.id, post.title, post.author.name, post.likes, post.comments
            );
        }
        Ok(())
    }

    fn comments(&self, comments: &[Comment]) -> Result<()> {
        if self.json(&comments)? {
            return Ok(());
        }
        for comment in comments {
            println!(
                "- [{}] {} ({}): {}",
                comment.id, comment.author.name, comment.created_at, comment.content
            );
        }
        Ok(())
    }
}

fn print_user_fields(user: &User) {
    println!("user:");
    println!("  id: {}", user.id);
    println!("  name: {}", user.name);
    println!("  email: {}", user.email);
    if let Some(headline) = &user.headline {
        println!("  headline: {headline}");
    }
    if let Some(avatar_url) = &user.avatar_url {
        println!("  avatar: {avatar_url}");
    }
}

fn shorten(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env() {
        assert_eq!(resolve_server(None, None), DEFAULT_HTTP_SERVER);
        assert_eq!(
            resolve_server(None, Some("localhost:9000".to_string())),
            "http://localhost:9000"
        );
        assert_eq!(
            resolve_server(
                Some("localhost:9999".to_string()),
                Some("localhost:9000".to_string())
            ),
            "http://localhost:9999"
        );
    }

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(parse_tags(" rust, web ,,"), vec!["rust", "web"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }

    #[test]
    fn shorten_cuts_long_data_urls() {
        assert_eq!(shorten("abc", 5), "abc");
        assert_eq!(shorten("abcdef", 3), "abc…");
    }

    #[test]
    fn cli_parses_post_flags() {
        let cli = Cli::try_parse_from([
            "blog-cli", "create", "--title", "T", "--content", "C", "--tags", "a,b", "--draft",
        ])
        .expect("valid args");
        assert!(matches!(cli.command, Command::Create { draft: true, .. }));

        let cli = Cli::try_parse_from(["blog-cli", "list", "--sort", "likes", "--page", "2"])
            .expect("valid args");
        assert!(matches!(
            cli.command,
            Command::List {
                sort: SortArg::Likes,
                page: PageArgs {
                    page: Some(2),
                    limit: None
                }
            }
        ));
    }
}
