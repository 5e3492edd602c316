//! API utilities for frontend-backend communication

/// Порт backend-сервера
const API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
/// Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path ("/api/...")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Путь ресурса анализа: `/api/analysis/{id}{suffix}`
pub fn analysis_path(id: &str, suffix: &str) -> String {
    format!("/api/analysis/{}{}", urlencoding::encode(id), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_path() {
        assert_eq!(analysis_path("3f2a9c71", ""), "/api/analysis/3f2a9c71");
        assert_eq!(
            analysis_path("3f2a9c71", "/product/2"),
            "/api/analysis/3f2a9c71/product/2"
        );
        assert_eq!(analysis_path("a b/c", ""), "/api/analysis/a%20b%2Fc");
    }
}
