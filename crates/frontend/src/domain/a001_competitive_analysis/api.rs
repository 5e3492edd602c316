use contracts::domain::a001_competitive_analysis::aggregate::{
    AnalysisSummary, CompetitiveAnalysis, ProductAnalysis,
};
use leptos::prelude::*;

use crate::shared::api_utils::analysis_path;
use crate::system::auth::api::{fetch_with_auth, FetchError};
use crate::system::auth::context::{handle_unauthorized, AuthState};

/// Все анализы, новые первыми
pub async fn fetch_list(token: Option<String>) -> Result<Vec<AnalysisSummary>, FetchError> {
    fetch_with_auth("/api/analysis", token.as_deref()).await
}

pub async fn fetch_analysis(
    id: String,
    token: Option<String>,
) -> Result<CompetitiveAnalysis, FetchError> {
    fetch_with_auth(&analysis_path(&id, ""), token.as_deref()).await
}

/// Продукт по исходному индексу
pub async fn fetch_product(
    id: String,
    index: usize,
    token: Option<String>,
) -> Result<ProductAnalysis, FetchError> {
    let path = analysis_path(&id, &format!("/product/{}", index));
    fetch_with_auth(&path, token.as_deref()).await
}

/// Раскладывает результат загрузки по сигналам страницы.
/// 401 сбрасывает сессию, остальные ошибки показываются баннером.
pub fn apply_result<T>(
    result: Result<T, FetchError>,
    set_data: WriteSignal<Option<T>>,
    set_error: WriteSignal<Option<String>>,
    set_auth_state: WriteSignal<AuthState>,
) where
    T: Send + Sync + 'static,
{
    match result {
        Ok(data) => {
            set_data.set(Some(data));
            set_error.set(None);
        }
        Err(FetchError::Unauthorized) => handle_unauthorized(set_auth_state),
        Err(FetchError::Failed(message)) => {
            log::error!("Failed to load analysis data: {}", message);
            set_error.set(Some(message));
        }
    }
}
