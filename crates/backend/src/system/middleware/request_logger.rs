use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::{format_duration, format_number};

/// Middleware для логирования HTTP запросов
///
/// Пишет в tracing: метод, путь, статус, длительность и размер ответа.
/// Ошибки 5xx идут уровнем warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} | {} | body error: {}",
                method,
                path,
                parts.status.as_u16(),
                format_duration(start.elapsed()),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status;
    let duration = format_duration(start.elapsed());
    let size = format_number(bytes.len());
    if status.is_server_error() {
        tracing::warn!("{} {} -> {} | {} | {} B", method, path, status.as_u16(), duration, size);
    } else {
        tracing::info!("{} {} -> {} | {} | {} B", method, path, status.as_u16(), duration, size);
    }

    // Создаем новый ответ с прочитанным телом
    Response::from_parts(parts, Body::from(bytes))
}
