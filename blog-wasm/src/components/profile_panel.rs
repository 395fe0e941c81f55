use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::cache::{Mutation, QueryKey};
use crate::models::{ProfileUpdate, User};
use crate::state::AppState;

/// Only fields that differ from the current profile are sent.
fn profile_changes(
    current: &User,
    name: &str,
    email: &str,
    headline: &str,
    avatar_url: &str,
) -> ProfileUpdate {
    fn changed(new: &str, old: Option<&str>) -> Option<String> {
        let new = new.trim();
        (!new.is_empty() && Some(new) != old).then(|| new.to_string())
    }

    ProfileUpdate {
        name: changed(name, Some(&current.name)),
        email: changed(email, Some(&current.email)),
        headline: changed(headline, current.headline.as_deref()),
        avatar_url: changed(avatar_url, current.avatar_url.as_deref()),
    }
}

fn is_empty(update: &ProfileUpdate) -> bool {
    update.name.is_none()
        && update.email.is_none()
        && update.headline.is_none()
        && update.avatar_url.is_none()
}

#[component]
pub(crate) fn ProfilePanel(state: AppState) -> impl IntoView {
    let profile = RwSignal::new(None::<User>);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let headline = RwSignal::new(String::new());
    let avatar_url = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _generation = state.generation(&QueryKey::Profile);
        let Some(token) = state.token.get() else {
            profile.set(None);
            return;
        };
        spawn_local(async move {
            match api::get_profile(&token).await {
                Ok(user) => {
                    name.set(user.name.clone());
                    email.set(user.email.clone());
                    headline.set(user.headline.clone().unwrap_or_default());
                    avatar_url.set(user.avatar_url.clone().unwrap_or_default());
                    profile.set(Some(user));
                }
                Err(err) => state.report(err),
            }
        });
    });

    let on_save = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (Some(token), Some(current)) = (state.token.get(), profile.get()) else {
            return;
        };

        let update = profile_changes(
            &current,
            &name.get(),
            &email.get(),
            &headline.get(),
            &avatar_url.get(),
        );
        if is_empty(&update) {
            return;
        }

        state.loading.set(true);
        spawn_local(async move {
            match api::update_profile(&token, &update).await {
                Ok(user) => {
                    let user_id = user.id;
                    state.set_user(user);
                    state.clear_error();
                    state.invalidate(Mutation::UpdateProfile { user_id });
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    view! {
        <Show when=move || profile.with(Option::is_some)>
            <h2>"Profile"</h2>
            {move || {
                profile
                    .get()
                    .and_then(|user| user.avatar_url)
                    .map(|src| view! { <img src=src alt="avatar" width="64" height="64" /> })
            }}
            <form on:submit=on_save>
                <input
                    placeholder="name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    placeholder="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="headline"
                    prop:value=move || headline.get()
                    on:input=move |ev| headline.set(event_target_value(&ev))
                />
                <input
                    placeholder="avatar url"
                    prop:value=move || avatar_url.get()
                    on:input=move |ev| avatar_url.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.loading.get()>"Save profile"</button>
            </form>
            <hr style="margin: 1rem 0;" />
        </Show>
    }
}
