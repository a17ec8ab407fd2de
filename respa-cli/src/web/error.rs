//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::pagination::PageError;

/// Error returned by page handlers
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("Failed to render template"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                log::debug!("404: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    Html(format!(
                        "<h1>Not Found</h1><p>{}</p>",
                        handlebars::html_escape(&message)
                    )),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                log::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Server Error</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_escapes_message() {
        let response = AppError::NotFound("Page '<b>' is not a number".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_text(response).await;
        assert!(body.contains("&lt;b&gt;"), "{}", body);
        assert!(!body.contains("<b>"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::from(anyhow::anyhow!("database is locked")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_text(response).await.contains("locked"));
    }
}
