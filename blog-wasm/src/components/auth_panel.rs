use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{LoginRequest, RegisterRequest};
use crate::state::AppState;

fn check_register(form: &RegisterRequest) -> Result<(), &'static str> {
    if form.name.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Err("Заполните все поля регистрации");
    }
    if form.password != form.password_confirmation {
        return Err("Пароли не совпадают");
    }
    Ok(())
}

#[component]
pub(crate) fn AuthPanel(state: AppState) -> impl IntoView {
    let reg_name = RwSignal::new(String::new());
    let reg_email = RwSignal::new(String::new());
    let reg_password = RwSignal::new(String::new());
    let reg_confirmation = RwSignal::new(String::new());

    let login_email = RwSignal::new(String::new());
    let login_password = RwSignal::new(String::new());

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();

        let payload = RegisterRequest {
            name: reg_name.get().trim().to_string(),
            email: reg_email.get().trim().to_string(),
            password: reg_password.get(),
            password_confirmation: reg_confirmation.get(),
        };
        if let Err(message) = check_register(&payload) {
            state.set_error(message);
            return;
        }

        state.loading.set(true);
        spawn_local(async move {
            match api::register(&payload).await {
                Ok(auth) => {
                    state.sign_in(auth);
                    reg_password.set(String::new());
                    reg_confirmation.set(String::new());
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();

        let payload = LoginRequest {
            email: login_email.get().trim().to_string(),
            password: login_password.get(),
        };
        if payload.email.is_empty() || payload.password.is_empty() {
            state.set_error("Заполните все поля входа");
            return;
        }

        state.loading.set(true);
        spawn_local(async move {
            match api::login(&payload).await {
                Ok(auth) => {
                    state.sign_in(auth);
                    login_password.set(String::new());
                }
                Err(err) => state.report(err),
            }
            state.loading.set(false);
        });
    };

    let on_logout = move |_| {
        let token = state.token.get_untracked();
        spawn_local(async move {
            // сервер токены не отзывает, поэтому ошибка тут не важна
            let _ = api::logout(token.as_deref()).await;
        });
        state.sign_out();
        state.clear_error();
    };

    view! {
        <Show
            when=move || state.is_authenticated()
            fallback=move || view! {
                <h2>"Register"</h2>
                <form on:submit=on_register>
                    <input
                        placeholder="name"
                        on:input=move |ev| reg_name.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="email"
                        on:input=move |ev| reg_email.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="password"
                        type="password"
                        prop:value=move || reg_password.get()
                        on:input=move |ev| reg_password.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="repeat password"
                        type="password"
                        prop:value=move || reg_confirmation.get()
                        on:input=move |ev| reg_confirmation.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || state.loading.get()>"Register"</button>
                </form>

                <h2 style="margin-top: 1rem;">"Login"</h2>
                <form on:submit=on_login>
                    <input
                        placeholder="email"
                        on:input=move |ev| login_email.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="password"
                        type="password"
                        prop:value=move || login_password.get()
                        on:input=move |ev| login_password.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || state.loading.get()>"Login"</button>
                </form>
            }
        >
            <button on:click=on_logout disabled=move || state.loading.get()>
                "Logout"
            </button>
        </Show>

        <hr style="margin: 1rem 0;" />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirmation: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn check_register_accepts_matching_passwords() {
        assert!(check_register(&form("secret1", "secret1")).is_ok());
    }

    #[test]
    fn check_register_rejects_mismatch_and_blanks() {
        assert_eq!(check_register(&form("secret1", "secret2")), Err("Пароли не совпадают"));
        assert!(check_register(&form("", "")).is_err());
    }
}
