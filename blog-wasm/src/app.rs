use leptos::prelude::*;

use crate::components::auth_panel::AuthPanel;
use crate::components::posts_panel::PostsPanel;
use crate::components::profile_panel::ProfilePanel;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    let auth_text = move || {
        if state.is_authenticated() {
            "yes".to_string()
        } else {
            "no".to_string()
        }
    };

    let user_text = move || {
        state
            .user
            .get()
            .map(|u| format!("{} ({})", u.name, u.email))
            .unwrap_or_else(|| "anonymous".to_string())
    };

    let error_text = move || state.error.get().unwrap_or_default();

    view! {
        <main class="page">
            <section class="container">
                <h1>"Rust Blog (Leptos)"</h1>
                <p>"Auth: " {auth_text}</p>
                <p>"Current user: " {user_text}</p>

                <AuthPanel state=state />
                <ProfilePanel state=state />

                <Show when=move || !state.error.get().unwrap_or_default().is_empty()>
                    <div class="error-banner">
                        <strong>"Ошибка: "</strong>
                        {error_text}
                        <button style="margin-left: 0.5rem;" on:click=move |_| state.clear_error()>
                            "×"
                        </button>
                    </div>
                </Show>

                <PostsPanel state=state />
            </section>
        </main>
    }
}
