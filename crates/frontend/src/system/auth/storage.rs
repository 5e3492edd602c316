use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const EXPIRES_AT_KEY: &str = "auth_expires_at";

/// Токен живёт только в пределах вкладки браузера
fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Текущее время в секундах Unix
fn now_seconds() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Save access token and its expiry to sessionStorage
pub fn save_session(token: &str, expires_at: i64) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
        let _ = storage.set_item(EXPIRES_AT_KEY, &expires_at.to_string());
    }
}

/// Сохранённый токен, если он ещё действует. Истёкший сразу удаляется.
pub fn get_access_token() -> Option<String> {
    let storage = get_session_storage()?;
    let token = storage.get_item(ACCESS_TOKEN_KEY).ok()??;
    let expires_at = storage.get_item(EXPIRES_AT_KEY).ok()?;
    if session_is_valid(&token, expires_at.as_deref(), now_seconds()) {
        Some(token)
    } else {
        clear_session();
        None
    }
}

/// Clear all authentication data
pub fn clear_session() {
    if let Some(storage) = get_session_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(EXPIRES_AT_KEY);
    }
}

/// Токен пригоден, если он не пуст и срок действия ещё не наступил.
/// Без сохранённого срока токен считается недействительным.
fn session_is_valid(token: &str, expires_at: Option<&str>, now: i64) -> bool {
    if token.is_empty() {
        return false;
    }
    expires_at
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .is_some_and(|exp| exp > now)
}
