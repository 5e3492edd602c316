use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::{LoginResponse, TokenClaims};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::shared::config::AuthConfig;

const TOKEN_SUBJECT: &str = "dashboard";

/// Ключи и параметры входа, создаются один раз при старте.
#[derive(Clone)]
pub struct AuthKeys {
    /// Argon2-хэш пароля в формате PHC; `None` означает, что вход отключён
    password_hash: Option<String>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl AuthKeys {
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let secret = match config.effective_secret() {
            Some(secret) => secret.to_string(),
            None => {
                if config.effective_password().is_some() {
                    tracing::warn!(
                        "JWT_SECRET is not set, using a random secret: tokens will not survive a restart"
                    );
                }
                generate_jwt_secret()
            }
        };
        Self::new(
            config.effective_password(),
            &secret,
            Duration::hours(config.token_lifetime_hours),
        )
    }

    pub fn new(password: Option<&str>, secret: &str, lifetime: Duration) -> Result<Self> {
        Ok(Self {
            password_hash: password.map(hash_password).transpose()?,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        })
    }

    pub fn requires_auth(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            return false;
        };
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!("Stored password hash is invalid: {}", e);
                false
            }
        }
    }

    /// Выпускает токен, действующий `lifetime` от `now`
    pub fn issue(&self, now: DateTime<Utc>) -> Result<LoginResponse> {
        let exp = (now + self.lifetime).timestamp();
        let claims = TokenClaims {
            sub: TOKEN_SUBJECT.to_string(),
            exp,
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to encode JWT token")?;
        Ok(LoginResponse {
            access_token,
            expires_at: exp,
        })
    }

    /// Validate JWT token and extract claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.sub = Some(TOKEN_SUBJECT.to_string());
        let token_data = decode::<TokenClaims>(token, &self.decoding, &validation)
            .context("Failed to decode JWT token")?;
        Ok(token_data.claims)
    }
}

/// Хэширует пароль Argon2id со случайной солью
fn hash_password(password: &str) -> Result<String> {
    let salt_bytes: [u8; 16] = rand::thread_rng().gen();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to encode salt: {e}"))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> AuthKeys {
        AuthKeys::new(Some("letmein"), "test-secret", Duration::hours(12)).unwrap()
    }

    #[test]
    fn test_password_verification() {
        let keys = keys();
        assert!(keys.requires_auth());
        assert!(keys.verify_password("letmein"));
        assert!(!keys.verify_password("letmein "));
        assert!(!keys.verify_password(""));
    }

    #[test]
    fn test_padded_password_must_match_exactly() {
        let config = AuthConfig {
            password: Some(" pw ".into()),
            token_lifetime_hours: 1,
            jwt_secret: Some("s".into()),
        };
        let keys = AuthKeys::from_config(&config).unwrap();
        assert!(keys.verify_password(" pw "));
        assert!(!keys.verify_password("pw"));
    }

    #[test]
    fn test_no_password_means_no_gate() {
        let keys = AuthKeys::new(None, "s", Duration::hours(1)).unwrap();
        assert!(!keys.requires_auth());
        assert!(!keys.verify_password(""));
    }

    #[test]
    fn test_issue_and_validate() {
        let keys = keys();
        let now = Utc::now();
        let response = keys.issue(now).unwrap();
        assert_eq!(response.expires_at, (now + Duration::hours(12)).timestamp());

        let claims = keys.validate(&response.access_token).unwrap();
        assert_eq!(claims.sub, TOKEN_SUBJECT);
        assert_eq!(claims.exp, response.expires_at);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(13);
        let response = keys.issue(issued).unwrap();
        assert!(keys.validate(&response.access_token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other =
            AuthKeys::new(Some("letmein"), "another-secret", Duration::hours(12)).unwrap();
        let response = other.issue(Utc::now()).unwrap();
        assert!(keys().validate(&response.access_token).is_err());
        assert!(keys().validate("not.a.jwt").is_err());
    }

    #[test]
    fn test_generated_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        let bytes = general_purpose::STANDARD.decode(secret).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_from_config_uses_lifetime() {
        let config = AuthConfig {
            password: Some("pw".into()),
            token_lifetime_hours: 2,
            jwt_secret: Some("cfg-secret".into()),
        };
        let keys = AuthKeys::from_config(&config).unwrap();
        let now = Utc::now();
        let response = keys.issue(now).unwrap();
        assert_eq!(response.expires_at, (now + Duration::hours(2)).timestamp());
        assert!(keys.verify_password("pw"));
    }
}
