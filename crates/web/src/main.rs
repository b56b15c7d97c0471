use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hkrec_core::domain::recommendation::{RecommendationListing, StockRecommendation};

mod page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = hkrec_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let listing = hkrec_core::picks::curated_top5();
    if let Err(e) = listing.validate() {
        sentry_anyhow::capture_anyhow(&e);
        return Err(e.context("curated listing failed validation"));
    }

    let state = AppState {
        listing: Arc::new(listing),
    };
    let app = router(state);

    let port = settings.port.unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "web ui listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub listing: Arc<RecommendationListing>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/analyze", post(page::run_analysis))
        .route("/static/styles.css", get(styles_css))
        .route("/healthz", get(healthz))
        .route("/picks/latest", get(get_latest_picks))
        .route("/picks/:code", get(get_pick_by_code))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn styles_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../static/styles.css"),
    )
}

async fn get_latest_picks(State(state): State<AppState>) -> Json<RecommendationListing> {
    Json((*state.listing).clone())
}

async fn get_pick_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StockRecommendation>, StatusCode> {
    let item = state
        .listing
        .items
        .iter()
        .find(|s| s.code == code)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &hkrec_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            listing: Arc::new(hkrec_core::picks::curated_top5()),
        })
    }

    fn empty_app() -> Router {
        router(AppState {
            listing: Arc::new(RecommendationListing {
                generated_at: Utc::now(),
                items: Vec::new(),
            }),
        })
    }

    async fn body_text(response: axum::http::Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(body: &str) -> Request<Body> {
        Request::post("/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn index_renders_five_cards_in_rank_order() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"stock-card\"").count(), 5);

        let order: Vec<usize> = ["TENCENT", "HSBC HOLDINGS", "ALIBABA GROUP", "AIA GROUP", "MEITUAN"]
            .iter()
            .map(|name| html.find(name).unwrap_or_else(|| panic!("{name} missing")))
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "cards out of order");
    }

    #[tokio::test]
    async fn index_shows_fields_and_category_markers() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("HK$320.50"));
        assert!(html.contains("9.2 points"));
        assert!(html.contains("0700.HK"));

        assert!(html.contains("✓ Buy signal"));
        assert!(html.contains("↑ Recent 5-day return: +12.3%"));
        assert!(html.contains("↓ Resistance zone, possible adjustment (Overheating: 76.4)"));
        assert!(html.contains("• Technical rebound potential: High"));
    }

    #[tokio::test]
    async fn index_has_title_settings_and_footer() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Hong Kong Stock Recommendation System"));
        assert!(html.contains("Beginner-friendly stock analysis tool"));
        assert!(html.contains("1. Analysis Settings"));
        assert!(html.contains("Recommendation Overlap Index"));
        assert!(html.contains("Minimum Trading Amount (Million HKD)"));
        assert!(html.contains("Run New Analysis"));
        assert!(html.contains("3. Recommended Stocks TOP 5"));
        assert!(html.contains("Higher scores indicate better buying opportunities"));
        assert!(html.contains(
            "© 2024 Hong Kong Stock Recommendation System | Investment losses are the responsibility of the investor"
        ));
        // Defaults echoed into the controls.
        assert!(html.contains("value=\"5\""));
        assert!(html.contains("value=\"100\""));
    }

    #[tokio::test]
    async fn analyze_always_reports_success_for_valid_settings() {
        let response = app()
            .oneshot(form_post("overlap_index=7&min_trading_amount=250"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Analysis completed!"));
        // Submitted settings come back, listing unchanged.
        assert!(html.contains("value=\"7\""));
        assert!(html.contains("value=\"250\""));
        assert_eq!(html.matches("class=\"stock-card\"").count(), 5);
    }

    #[tokio::test]
    async fn analyze_rejects_out_of_range_overlap_index() {
        let response = app()
            .oneshot(form_post("overlap_index=11&min_trading_amount=100"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains("overlap index"));
        // Panel reverts to defaults.
        assert!(html.contains("value=\"5\""));
    }

    #[tokio::test]
    async fn analyze_rejects_trading_amount_off_step() {
        let response = app()
            .oneshot(form_post("overlap_index=5&min_trading_amount=105"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains("multiple of 10"));
    }

    #[tokio::test]
    async fn empty_listing_renders_zero_cards() {
        let response = empty_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"stock-card\"").count(), 0);
        assert!(html.contains("3. Recommended Stocks TOP 5"));
    }

    #[tokio::test]
    async fn healthz_ok() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn picks_latest_returns_full_listing_as_json() {
        let response = app()
            .oneshot(Request::get("/picks/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        let items = v["items"].as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["code"], "0700.HK");
        assert_eq!(items[0]["indicators"][2]["category"], "buy_signal");
    }

    #[tokio::test]
    async fn pick_by_code_finds_item_or_404s() {
        let response = app()
            .oneshot(Request::get("/picks/3690.HK").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(v["name"], "MEITUAN");
        assert_eq!(v["rank"], 5);

        let response = app()
            .oneshot(Request::get("/picks/9999.HK").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stylesheet_served_as_css() {
        let response = app()
            .oneshot(
                Request::get("/static/styles.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/css"));
        assert!(body_text(response).await.contains(".stock-card"));
    }
}
