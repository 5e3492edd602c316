use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon_sized;
use crate::system::auth::{api, context};

#[component]
pub fn LoginPage() -> impl IntoView {
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (auth_state, set_auth_state) = context::use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let password_val = password.get_untracked();
        if password_val.is_empty() {
            set_error_message.set(Some("Enter the dashboard password".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(password_val).await {
                Ok(response) => {
                    // Смена состояния сама переключит на дашборд
                    context::complete_login(
                        set_auth_state,
                        response.access_token,
                        response.expires_at,
                    );
                    password.set(String::new());
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_message.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-box__icon">{icon_sized("lock", 32)}</div>
                <h1>"Competitive Analysis"</h1>
                <h2>"Sign in to view the dashboard"</h2>

                // Ошибка статуса сервера или входа
                {move || {
                    error_message
                        .get()
                        .or_else(|| auth_state.get().error)
                        .map(|message| {
                            view! {
                                <MessageBar intent=MessageBarIntent::Error>
                                    <MessageBarBody>{message}</MessageBarBody>
                                </MessageBar>
                            }
                        })
                }}

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <Input
                            value=password
                            input_type=InputType::Password
                            placeholder="Dashboard password"
                            disabled=is_loading
                        />
                    </div>

                    <Button
                        button_type=ButtonType::Submit
                        appearance=ButtonAppearance::Primary
                        disabled=is_loading
                        attr:style="width: 100%;"
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </Button>
                </form>
            </div>
        </div>
    }
}
