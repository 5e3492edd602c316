use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// `None` пока статус сервера не получен
    pub requires_auth: Option<bool>,
    pub access_token: Option<String>,
    pub error: Option<String>,
}

impl AuthState {
    /// Можно ли показывать данные
    pub fn is_authorized(&self) -> bool {
        match self.requires_auth {
            Some(true) => self.access_token.is_some(),
            Some(false) => true,
            None => false,
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Узнаём у сервера, нужен ли пароль, и восстанавливаем сессию вкладки
    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_status().await {
                Ok(status) => {
                    let access_token = if status.requires_auth {
                        storage::get_access_token()
                    } else {
                        None
                    };
                    set_auth_state.set(AuthState {
                        requires_auth: Some(status.requires_auth),
                        access_token,
                        error: None,
                    });
                }
                Err(e) => {
                    log::error!("Auth status request failed: {}", e);
                    set_auth_state.set(AuthState {
                        requires_auth: Some(true),
                        access_token: None,
                        error: Some(e),
                    });
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Сохраняет выданный токен и открывает доступ
pub fn complete_login(set_auth_state: WriteSignal<AuthState>, token: String, expires_at: i64) {
    storage::save_session(&token, expires_at);
    set_auth_state.update(|state| {
        state.access_token = Some(token);
        state.error = None;
    });
}

/// Выход: токен забывается, показывается страница входа
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.update(|state| state.access_token = None);
}

/// Реакция на 401 от API: сессия протухла
pub fn handle_unauthorized(set_auth_state: WriteSignal<AuthState>) {
    log::warn!("API rejected the session token");
    sign_out(set_auth_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authorized() {
        let mut state = AuthState::default();
        assert!(!state.is_authorized());

        state.requires_auth = Some(false);
        assert!(state.is_authorized());

        state.requires_auth = Some(true);
        assert!(!state.is_authorized());

        state.access_token = Some("token".into());
        assert!(state.is_authorized());
    }
}
