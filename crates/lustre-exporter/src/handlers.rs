//! HTTP request handlers: metrics endpoint and landing page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, error};

use lustre_core::collector::Scraper;

use crate::exposition;

pub(crate) struct AppState {
    pub scraper: Scraper,
    pub telemetry_path: String,
}

pub(crate) type SharedState = Arc<AppState>;

/// Scrapes every source family on a blocking worker and returns the text format.
pub(crate) async fn handle_metrics(State(state): State<SharedState>) -> Response {
    let result = tokio::task::spawn_blocking(move || exposition::render_text(&state.scraper)).await;

    match result {
        Ok(Ok(body)) => {
            debug!(bytes = body.len(), "served metrics");
            ([(header::CONTENT_TYPE, exposition::text_content_type())], body).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "scrape panicked in spawn_blocking");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) async fn handle_landing(State(state): State<SharedState>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>Lustre Exporter</title></head>\n<body>\n\
         <h1>Lustre Exporter</h1>\n<p><a href=\"{}\">Metrics</a></p>\n</body>\n</html>\n",
        state.telemetry_path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;
    use lustre_core::collector::MockFs;
    use lustre_core::config::{Config, EnableLevel, Levels};

    fn state() -> SharedState {
        let config = Config {
            levels: Levels {
                ost: EnableLevel::Core,
                health: EnableLevel::Core,
                ..Levels::none()
            },
            ..Config::default()
        };
        Arc::new(AppState {
            scraper: Scraper::new(Arc::new(MockFs::ost_server()), &config).unwrap(),
            telemetry_path: "/metrics".to_string(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_handler() {
        let response = handle_metrics(State(state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );

        let body = body_text(response).await;
        assert!(body.contains(r#"lustre_exports_total{component="ost",target="lustrefs-OST0001"} 2"#));
        assert!(body.contains("# TYPE lustre_health_check gauge"));
    }

    #[tokio::test]
    async fn test_landing_links_telemetry_path() {
        let Html(page) = handle_landing(State(state())).await;
        assert!(page.contains(r#"<a href="/metrics">"#));
    }
}
