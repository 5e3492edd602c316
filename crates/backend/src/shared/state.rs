use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::system::auth::jwt::AuthKeys;

/// Состояние приложения, передаётся обработчикам через `State`.
///
/// Соединение создаётся при старте и закрывается вместе с процессом.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthKeys>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthKeys) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
        }
    }
}
