use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Unix timestamp (секунды), после которого токен недействителен
    pub expires_at: i64,
}

/// Нужен ли вход в систему
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub requires_auth: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at
    pub jti: String,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_boundary() {
        let claims = TokenClaims {
            sub: "dashboard".into(),
            exp: 100,
            iat: 0,
            jti: "x".into(),
        };
        assert!(!claims.is_expired_at(99));
        assert!(claims.is_expired_at(100));
    }
}
