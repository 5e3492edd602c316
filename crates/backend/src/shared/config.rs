use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: None,
            token_lifetime_hours: default_token_lifetime_hours(),
            jwt_secret: None,
        }
    }
}

impl AuthConfig {
    /// Пароль, если он задан и не состоит из одних пробелов.
    /// Сам пароль не обрезается: сравнивается ровно то, что задано.
    pub fn effective_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn effective_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_lifetime_hours() -> i64 {
    12
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[database]
url = "sqlite://db/analysis.db"

[auth]
token_lifetime_hours = 12
"#;

impl Config {
    /// Переопределения из окружения.
    ///
    /// `lookup` возвращает значение переменной; пустые значения игнорируются.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL").or_else(|| get("NEON_DATABASE_URL")) {
            self.database.url = url;
        }
        if let Some(password) = get("APP_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }
        Ok(())
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables are applied on top of either source.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    config.apply_env_overrides(|name| std::env::var(name).ok())?;
    if config.auth.token_lifetime_hours <= 0 {
        anyhow::bail!(
            "auth.token_lifetime_hours must be positive, got {}",
            config.auth.token_lifetime_hours
        );
    }
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Cannot parse {}", config_path.display()))?;
            return Ok(config);
        } else {
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Строка подключения с относительным путём sqlite, разрешённым от `base_dir`.
///
/// Для sqlite также возвращается путь к файлу, чтобы создать его каталог.
/// Прочие URL (postgres) возвращаются без изменений.
pub fn resolve_database_url(url: &str, base_dir: Option<&Path>) -> (String, Option<PathBuf>) {
    let Some(rest) = url.strip_prefix("sqlite:") else {
        return (url.to_string(), None);
    };
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    if path_str == ":memory:" || path_str.is_empty() {
        return (url.to_string(), None);
    }

    let path = Path::new(path_str);
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match base_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    };

    // Windows: C:\x -> /C:/x
    let normalized = resolved.to_string_lossy().replace('\\', "/");
    let prefix = if !normalized.starts_with('/') && normalized.contains(':') {
        "/"
    } else {
        ""
    };
    let query = query.unwrap_or("mode=rwc");
    (
        format!("sqlite://{prefix}{normalized}?{query}"),
        Some(resolved),
    )
}

/// URL базы данных из конфигурации; относительные пути sqlite от каталога exe
pub fn database_url(config: &Config) -> (String, Option<PathBuf>) {
    resolve_database_url(&config.database.url, exe_dir().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn default_config() -> Config {
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite://db/analysis.db");
        assert_eq!(config.auth.token_lifetime_hours, 12);
        assert_eq!(config.auth.effective_password(), None);
        assert_eq!(config.auth.effective_secret(), None);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[database]\nurl = \"postgres://x\"\n").unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    fn test_blank_password_disables_auth() {
        let config: Config =
            toml::from_str("[database]\nurl = \"x\"\n[auth]\npassword = \"   \"\n").unwrap();
        assert_eq!(config.auth.effective_password(), None);
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let config: Config =
            toml::from_str("[database]\nurl = \"x\"\n[auth]\npassword = \" pw \"\n").unwrap();
        assert_eq!(config.auth.effective_password(), Some(" pw "));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = default_config();
        let vars = env(&[
            ("NEON_DATABASE_URL", "postgres://neon/db"),
            ("APP_PASSWORD", "s3cret"),
            ("JWT_SECRET", "k"),
            ("PORT", "8080"),
        ]);
        config
            .apply_env_overrides(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.database.url, "postgres://neon/db");
        assert_eq!(config.auth.effective_password(), Some("s3cret"));
        assert_eq!(config.auth.effective_secret(), Some("k"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_database_url_takes_precedence_over_neon() {
        let mut config = default_config();
        let vars = env(&[
            ("DATABASE_URL", "postgres://primary"),
            ("NEON_DATABASE_URL", "postgres://neon"),
        ]);
        config
            .apply_env_overrides(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.database.url, "postgres://primary");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = default_config();
        let vars = env(&[("DATABASE_URL", ""), ("APP_PASSWORD", " ")]);
        config
            .apply_env_overrides(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.database.url, "sqlite://db/analysis.db");
        assert_eq!(config.auth.password, None);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let mut config = default_config();
        let vars = env(&[("PORT", "http")]);
        assert!(config
            .apply_env_overrides(|name| vars.get(name).cloned())
            .is_err());
    }

    #[test]
    fn test_resolve_relative_sqlite_url() {
        let (url, file) = resolve_database_url("sqlite://db/a.db", Some(Path::new("/opt/app")));
        assert_eq!(url, "sqlite:///opt/app/db/a.db?mode=rwc");
        assert_eq!(file, Some(PathBuf::from("/opt/app/db/a.db")));
    }

    #[test]
    fn test_resolve_keeps_query_and_absolute_path() {
        let (url, _) = resolve_database_url("sqlite:///var/a.db?mode=ro", Some(Path::new("/opt")));
        assert_eq!(url, "sqlite:///var/a.db?mode=ro");
    }

    #[test]
    fn test_resolve_passes_through_other_urls() {
        let (url, file) = resolve_database_url("postgres://u:p@h/db?sslmode=require", None);
        assert_eq!(url, "postgres://u:p@h/db?sslmode=require");
        assert_eq!(file, None);

        let (url, file) = resolve_database_url("sqlite::memory:", None);
        assert_eq!(url, "sqlite::memory:");
        assert_eq!(file, None);
    }
}
