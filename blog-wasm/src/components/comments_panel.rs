use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::cache::{Mutation, QueryKey};
use crate::models::Comment;
use crate::state::AppState;

const MAX_COMMENT_CHARS: usize = 1000;

fn check_comment(raw: &str) -> Result<String, &'static str> {
    let content = raw.trim();
    if content.is_empty() {
        return Err("Комментарий не может быть пустым");
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err("Комментарий длиннее 1000 символов");
    }
    Ok(content.to_string())
}

#[component]
pub(crate) fn CommentsPanel(state: AppState, post_id: i64) -> impl IntoView {
    let comments = RwSignal::new(Vec::<Comment>::new());
    let draft = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _generation = state.generation(&QueryKey::Comments(post_id));
        spawn_local(async move {
            match api::list_comments(post_id).await {
                Ok(loaded) => comments.set(loaded),
                Err(err) => state.report(err),
            }
        });
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let content = match check_comment(&draft.get()) {
            Ok(content) => content,
            Err(message) => {
                state.set_error(message);
                return;
            }
        };
        let Some(token) = state.token.get() else {
            state.set_error("Нужна авторизация, чтобы комментировать");
            return;
        };

        spawn_local(async move {
            match api::create_comment(&token, post_id, &content).await {
                Ok(_) => {
                    draft.set(String::new());
                    state.clear_error();
                    state.invalidate(Mutation::CreateComment { post_id });
                }
                Err(err) => state.report(err),
            }
        });
    };

    let on_delete = Callback::new(move |comment_id: i64| {
        let Some(token) = state.token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::delete_comment(&token, comment_id).await {
                Ok(_) => state.invalidate(Mutation::DeleteComment { post_id }),
                Err(err) => state.report(err),
            }
        });
    });

    view! {
        <div class="comments">
            <For
                each=move || comments.get()
                key=|comment| comment.id
                children=move |comment| {
                    let comment_id = comment.id;
                    let author_id = comment.author.id;
                    view! {
                        <div>
                            <strong>{comment.author.name.clone()}</strong>
                            <small>{format!(" · {}", comment.created_at)}</small>
                            <div>{comment.content.clone()}</div>
                            <Show when=move || state.current_user_id() == Some(author_id)>
                                <button on:click=move |_| on_delete.run(comment_id)>"Delete"</button>
                            </Show>
                        </div>
                    }
                }
            />
            <Show when=move || comments.with(Vec::is_empty)>
                <small>"Комментариев пока нет"</small>
            </Show>

            <Show when=move || state.is_authenticated()>
                <form on:submit=on_submit style="margin-top: 0.5rem;">
                    <input
                        placeholder="write a comment"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"Send"</button>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_comment_trims_content() {
        assert_eq!(check_comment("  nice post  "), Ok("nice post".to_string()));
    }

    #[test]
    fn check_comment_rejects_blank_and_too_long() {
        assert!(check_comment("   ").is_err());
        assert!(check_comment(&"x".repeat(MAX_COMMENT_CHARS + 1)).is_err());
        assert!(check_comment(&"x".repeat(MAX_COMMENT_CHARS)).is_ok());
    }
}
