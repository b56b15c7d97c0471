use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use hkrec_core::domain::recommendation::{IndicatorCategory, StockRecommendation};
use hkrec_core::domain::settings::{
    AnalysisSettings, MIN_TRADING_AMOUNT_RANGE, MIN_TRADING_AMOUNT_STEP, OVERLAP_INDEX_RANGE,
};

use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub settings: AnalysisSettings,
    pub notice: Notice,
    pub cards: Vec<CardView>,
    pub overlap_min: i32,
    pub overlap_max: i32,
    pub amount_min: i32,
    pub amount_max: i32,
    pub amount_step: i32,
}

#[derive(Debug, Clone)]
pub enum Notice {
    None,
    Success(String),
    Rejected(String),
}

/// Display-ready card, precomputed so the template stays branch-free.
#[derive(Debug, Clone)]
pub struct CardView {
    pub rank: i32,
    pub name: String,
    pub code: String,
    pub price: String,
    /// Score with one decimal, e.g. "9.2".
    pub score: String,
    pub indicators: Vec<IndicatorView>,
}

#[derive(Debug, Clone)]
pub struct IndicatorView {
    pub marker: &'static str,
    pub class: &'static str,
    pub text: String,
}

impl CardView {
    fn from_stock(stock: &StockRecommendation) -> Self {
        Self {
            rank: stock.rank,
            name: stock.name.clone(),
            code: stock.code.clone(),
            price: stock.price.clone(),
            score: format!("{:.1}", stock.score),
            indicators: stock
                .indicators
                .iter()
                .map(|line| IndicatorView {
                    marker: line.category.marker(),
                    class: category_class(line.category),
                    text: line.text.clone(),
                })
                .collect(),
        }
    }
}

fn category_class(category: IndicatorCategory) -> &'static str {
    match category {
        IndicatorCategory::BuySignal => "buy-signal",
        IndicatorCategory::Positive => "positive",
        IndicatorCategory::Negative => "negative",
        IndicatorCategory::Informational => "",
    }
}

pub async fn index(State(state): State<AppState>) -> Response {
    render_page(&state, AnalysisSettings::default(), Notice::None, StatusCode::OK)
}

/// The analyze action performs no computation: valid settings always come
/// back with a completion notice, invalid settings are rejected and the
/// panel reverts to defaults.
pub async fn run_analysis(
    State(state): State<AppState>,
    Form(settings): Form<AnalysisSettings>,
) -> Response {
    match settings.validate() {
        Ok(()) => render_page(
            &state,
            settings,
            Notice::Success("Analysis completed!".to_string()),
            StatusCode::OK,
        ),
        Err(e) => render_page(
            &state,
            AnalysisSettings::default(),
            Notice::Rejected(format!("{e:#}")),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    }
}

fn render_page(
    state: &AppState,
    settings: AnalysisSettings,
    notice: Notice,
    status: StatusCode,
) -> Response {
    let page = IndexPage {
        settings,
        notice,
        cards: state.listing.items.iter().map(CardView::from_stock).collect(),
        overlap_min: *OVERLAP_INDEX_RANGE.start(),
        overlap_max: *OVERLAP_INDEX_RANGE.end(),
        amount_min: *MIN_TRADING_AMOUNT_RANGE.start(),
        amount_max: *MIN_TRADING_AMOUNT_RANGE.end(),
        amount_step: MIN_TRADING_AMOUNT_STEP,
    };
    render_template(&page, status)
}

fn render_template<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template render failed").into_response()
        }
    }
}
