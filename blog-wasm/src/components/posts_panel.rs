use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api;
use crate::cache::{Feed, Mutation, QueryKey};
use crate::components::comments_panel::CommentsPanel;
use crate::models::{Post, PostPayload, PostsPage};
use crate::state::AppState;

fn validate_non_empty_fields(
    title: &str,
    content: &str,
    error_message: &'static str,
) -> Result<(), &'static str> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(error_message);
    }
    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn page_label(page: &PostsPage) -> String {
    format!(
        "Страница {} из {} (всего {})",
        page.page,
        page.last_page.max(1),
        page.total
    )
}

fn selected_file(input: NodeRef<Input>) -> Option<File> {
    input.get()?.files()?.get(0)
}

fn clear_file(input: NodeRef<Input>) {
    if let Some(input) = input.get() {
        input.set_value("");
    }
}

#[component]
fn FeedTab(
    label: &'static str,
    target: Feed,
    feed: RwSignal<Feed>,
    page: RwSignal<u32>,
) -> impl IntoView {
    let is_active = {
        let target = target.clone();
        move || feed.with(|current| *current == target)
    };

    view! {
        <button
            class:active=is_active
            on:click=move |_| {
                feed.set(target.clone());
                page.set(1);
            }
        >
            {label}
        </button>
    }
}

#[component]
pub(crate) fn PostsPanel(state: AppState) -> impl IntoView {
    let feed = RwSignal::new(Feed::Latest);
    let page = RwSignal::new(1u32);
    let posts = RwSignal::new(PostsPage::default());
    let request_seq = StoredValue::new(0u64);

    let search_text = RwSignal::new(String::new());

    let create_title = RwSignal::new(String::new());
    let create_content = RwSignal::new(String::new());
    let create_tags = RwSignal::new(String::new());
    let create_image_url = RwSignal::new(String::new());
    let create_draft = RwSignal::new(false);
    let create_file = NodeRef::<Input>::new();

    // перезапрос при смене ленты, страницы, токена или инвалидации лент
    Effect::new(move |_| {
        let current_feed = feed.get();
        let current_page = page.get();
        let token = state.token.get();
        let _generation = state.generation(&QueryKey::Posts(current_feed.clone()));

        if matches!(current_feed, Feed::Mine) && token.is_none() {
            feed.set(Feed::Latest);
            return;
        }

        let seq = request_seq.get_value() + 1;
        request_seq.set_value(seq);
        state.loading.set(true);
        spawn_local(async move {
            let result = api::list_feed(&current_feed, current_page, token.as_deref()).await;
            if request_seq.get_value() != seq {
                return;
            }
            match result {
                Ok(loaded) => posts.set(loaded),
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    });

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        match non_blank(search_text.get()) {
            Some(query) => {
                state.clear_error();
                feed.set(Feed::Search(query));
                page.set(1);
            }
            None => state.set_error("Введите строку поиска"),
        }
    };

    let on_create_post = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();

        let title = create_title.get().trim().to_string();
        let content = create_content.get().trim().to_string();
        if let Err(message) =
            validate_non_empty_fields(&title, &content, "Заполните title и content")
        {
            state.set_error(message);
            return;
        }

        let Some(token) = state.token.get() else {
            state.set_error("Нужна авторизация для создания поста");
            return;
        };

        let payload = PostPayload {
            title: Some(title),
            content: Some(content),
            tags: non_blank(create_tags.get()),
            image_url: non_blank(create_image_url.get()),
            published: Some(!create_draft.get()),
        };
        let image = selected_file(create_file);

        state.loading.set(true);
        spawn_local(async move {
            match api::create_post(&token, &payload, image).await {
                Ok(_) => {
                    create_title.set(String::new());
                    create_content.set(String::new());
                    create_tags.set(String::new());
                    create_image_url.set(String::new());
                    create_draft.set(false);
                    clear_file(create_file);
                    state.clear_error();
                    state.invalidate(Mutation::CreatePost);
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    let on_author = Callback::new(move |user_id: i64| {
        feed.set(Feed::ByUser(user_id));
        page.set(1);
    });

    view! {
        <h2>"Posts"</h2>

        <div class="tabs">
            <FeedTab label="Latest" target=Feed::Latest feed=feed page=page />
            <FeedTab label="Top liked" target=Feed::Likes feed=feed page=page />
            <FeedTab label="Recommended" target=Feed::Recommended feed=feed page=page />
            <FeedTab label="Most liked (text)" target=Feed::MostLiked feed=feed page=page />
            <Show when=move || state.is_authenticated()>
                <FeedTab label="My posts" target=Feed::Mine feed=feed page=page />
            </Show>
        </div>

        <form on:submit=on_search style="margin-top: 0.5rem;">
            <input
                placeholder="search title, content or tags"
                prop:value=move || search_text.get()
                on:input=move |ev| search_text.set(event_target_value(&ev))
            />
            <button type="submit">"Search"</button>
        </form>

        <Show when=move || state.is_authenticated()>
            <h3 style="margin-top: 1rem;">"Create post"</h3>
            <form on:submit=on_create_post>
                <input
                    placeholder="title"
                    prop:value=move || create_title.get()
                    on:input=move |ev| create_title.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="content"
                    prop:value=move || create_content.get()
                    on:input=move |ev| create_content.set(event_target_value(&ev))
                />
                <input
                    placeholder="tags, comma separated"
                    prop:value=move || create_tags.get()
                    on:input=move |ev| create_tags.set(event_target_value(&ev))
                />
                <input
                    placeholder="image url"
                    prop:value=move || create_image_url.get()
                    on:input=move |ev| create_image_url.set(event_target_value(&ev))
                />
                <input type="file" accept="image/*" node_ref=create_file />
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || create_draft.get()
                        on:change=move |ev| create_draft.set(event_target_checked(&ev))
                    />
                    " draft"
                </label>
                <button type="submit" disabled=move || state.loading.get()>
                    "Create"
                </button>
            </form>
        </Show>

        <p style="margin-top: 0.5rem;">{move || posts.with(page_label)}</p>

        <ul style="padding: 0;">
            <For
                each=move || posts.get().data
                key=|post| (post.id, post.likes, post.comments, post.title.clone(), post.content.clone())
                children=move |post| view! { <PostCard state=state post=post on_author=on_author /> }
            />
        </ul>

        <div>
            <button
                disabled=move || page.get() <= 1
                on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "Prev"
            </button>
            <button
                style="margin-left: 0.5rem;"
                disabled=move || page.get() >= posts.with(|p| p.last_page)
                on:click=move |_| page.update(|p| *p += 1)
            >
                "Next"
            </button>
        </div>
    }
}

#[component]
fn PostCard(state: AppState, post: Post, on_author: Callback<i64>) -> impl IntoView {
    let post_id = post.id;
    let author_id = post.author.id;

    let show_comments = RwSignal::new(false);
    let editing = RwSignal::new(false);
    let edit_title = RwSignal::new(post.title.clone());
    let edit_content = RwSignal::new(post.content.clone());
    let edit_tags = RwSignal::new(post.tags.join(", "));
    let edit_file = NodeRef::<Input>::new();

    let is_owner = move || state.current_user_id() == Some(author_id);

    let on_like = move |_| {
        let token = state.token.get_untracked();
        spawn_local(async move {
            match api::like_post(token.as_deref(), post_id).await {
                Ok(_) => state.invalidate(Mutation::LikePost { post_id }),
                Err(err) => state.report(err),
            }
        });
    };

    let on_delete = move |_| {
        let Some(token) = state.token.get_untracked() else {
            state.set_error("Нужна авторизация для удаления поста");
            return;
        };
        state.loading.set(true);
        spawn_local(async move {
            match api::delete_post(&token, post_id).await {
                Ok(ack) => {
                    web_sys::console::log_1(&ack.message.into());
                    state.invalidate(Mutation::DeletePost { post_id });
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    let on_save = move |_| {
        state.clear_error();
        let Some(token) = state.token.get_untracked() else {
            state.set_error("Нужна авторизация для обновления поста");
            return;
        };

        let title = edit_title.get_untracked().trim().to_string();
        let content = edit_content.get_untracked().trim().to_string();
        if let Err(message) = validate_non_empty_fields(
            &title,
            &content,
            "Заполните title и content для обновления",
        ) {
            state.set_error(message);
            return;
        }

        let payload = PostPayload {
            title: Some(title),
            content: Some(content),
            tags: Some(edit_tags.get_untracked()),
            ..Default::default()
        };
        let image = selected_file(edit_file);

        state.loading.set(true);
        spawn_local(async move {
            match api::update_post(&token, post_id, &payload, image).await {
                Ok(_) => {
                    editing.set(false);
                    state.invalidate(Mutation::UpdatePost { post_id });
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    let tags = post
        .tags
        .iter()
        .map(|tag| view! { <span class="tag">{tag.clone()}</span> })
        .collect_view();
    let image = post
        .image_url
        .clone()
        .map(|src| view! { <img src=src alt="" /> });
    let draft = (!post.published).then(|| view! { <em>" (draft)"</em> });

    view! {
        <li class="post">
            <strong>{post.title.clone()}</strong>
            {draft}
            <div>
                <small>
                    "by "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        on_author.run(author_id);
                    }>
                        {post.author.name.clone()}
                    </a>
                    {format!(" · {}", post.created_at)}
                </small>
            </div>
            {image}
            <p>{post.content.clone()}</p>
            <div>{tags}</div>

            <div style="margin-top: 0.5rem;">
                <button on:click=on_like>{format!("♥ {}", post.likes)}</button>
                <button
                    style="margin-left: 0.5rem;"
                    on:click=move |_| show_comments.update(|open| *open = !*open)
                >
                    {format!("Comments ({})", post.comments)}
                </button>

                <Show when=is_owner>
                    <button
                        style="margin-left: 0.5rem;"
                        on:click=move |_| editing.update(|open| *open = !*open)
                        disabled=move || state.loading.get()
                    >
                        "Edit"
                    </button>
                    <button
                        style="margin-left: 0.5rem;"
                        on:click=on_delete
                        disabled=move || state.loading.get()
                    >
                        "Delete"
                    </button>
                </Show>
            </div>

            <Show when=move || editing.get()>
                <div style="margin-top: 0.5rem;">
                    <input
                        placeholder="new title"
                        prop:value=move || edit_title.get()
                        on:input=move |ev| edit_title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="new content"
                        prop:value=move || edit_content.get()
                        on:input=move |ev| edit_content.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="tags"
                        prop:value=move || edit_tags.get()
                        on:input=move |ev| edit_tags.set(event_target_value(&ev))
                    />
                    <input type="file" accept="image/*" node_ref=edit_file />
                    <button on:click=on_save disabled=move || state.loading.get()>
                        "Save"
                    </button>
                    <button
                        style="margin-left: 0.5rem;"
                        on:click=move |_| editing.set(false)
                    >
                        "Cancel"
                    </button>
                </div>
            </Show>

            <Show when=move || show_comments.get()>
                <CommentsPanel state=state post_id=post_id />
            </Show>
        </li>
    }
}
