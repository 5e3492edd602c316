use contracts::system::auth::{AuthStatus, LoginRequest, LoginResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Ошибка запроса к защищённому API
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Сервер отклонил токен, нужен повторный вход
    Unauthorized,
    Failed(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unauthorized => write!(f, "Session expired, please sign in again"),
            FetchError::Failed(message) => write!(f, "{}", message),
        }
    }
}

/// Требует ли сервер вход
pub async fn fetch_status() -> Result<AuthStatus, String> {
    let response = Request::get(&api_url("/api/system/auth/status"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Status request failed: {}", response.status()));
    }

    response
        .json::<AuthStatus>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Login with the dashboard password
pub async fn login(password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { password };

    let response = Request::post(&api_url("/api/system/auth/login"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(login_error_message(response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

fn login_error_message(status: u16) -> String {
    match status {
        401 => "Incorrect password".to_string(),
        503 => "Authentication is not configured on the server".to_string(),
        other => format!("Login failed: {}", other),
    }
}

/// Fetch with authentication (helper function)
pub async fn fetch_with_auth<T>(path: &str, access_token: Option<&str>) -> Result<T, FetchError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let mut request = Request::get(&api_url(path));
    if let Some(token) = access_token {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }

    let response = request
        .send()
        .await
        .map_err(|e| FetchError::Failed(format!("Failed to send request: {}", e)))?;

    match response.status() {
        401 => return Err(FetchError::Unauthorized),
        404 => return Err(FetchError::Failed("Not found".to_string())),
        _ if !response.ok() => {
            return Err(FetchError::Failed(format!(
                "Request failed: {}",
                response.status()
            )))
        }
        _ => {}
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Failed(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages() {
        assert_eq!(login_error_message(401), "Incorrect password");
        assert!(login_error_message(503).contains("not configured"));
        assert_eq!(login_error_message(500), "Login failed: 500");
    }

    #[test]
    fn test_fetch_error_display() {
        assert!(FetchError::Unauthorized.to_string().contains("sign in"));
        assert_eq!(FetchError::Failed("Not found".into()).to_string(), "Not found");
    }
}
