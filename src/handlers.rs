use crate::errors::AppError;
use crate::models::{
    DashboardResponse, InsightsPayload, InsightsResponse, Measure, SelectionQuery, SeriesPoint,
    SeriesResponse, StatsResponse, TimeRange,
};
use crate::series::select_window;
use crate::state::AppState;
use crate::stats::{build_dashboard, derive_insights, derive_stats};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::debug;

pub async fn index(Query(query): Query<SelectionQuery>) -> Result<Html<String>, AppError> {
    let (range, measure) = parse_selection(&query)?;
    Ok(Html(render_index(range, measure)))
}

pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<SeriesResponse>, AppError> {
    let range = parse_range(&query)?;
    let window = select_window(&state.series, range)?;

    Ok(Json(SeriesResponse {
        range,
        points: window.records().iter().map(SeriesPoint::from).collect(),
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let (range, measure) = parse_selection(&query)?;
    let window = select_window(&state.series, range)?;

    Ok(Json(StatsResponse {
        range,
        measure,
        stats: derive_stats(&window, measure),
    }))
}

pub async fn get_insights(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let (range, measure) = parse_selection(&query)?;
    let window = select_window(&state.series, range)?;
    let insights = derive_insights(&window, measure);

    Ok(Json(InsightsResponse {
        range,
        measure,
        insights: InsightsPayload::new(&insights, measure),
    }))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let (range, measure) = parse_selection(&query)?;
    debug!(%range, %measure, "building dashboard");
    Ok(Json(build_dashboard(&state.series, range, measure)?))
}

fn parse_selection(query: &SelectionQuery) -> Result<(TimeRange, Measure), AppError> {
    let measure = match query.measure.as_deref() {
        Some(value) => value.parse::<Measure>().map_err(AppError::bad_request)?,
        None => Measure::default(),
    };
    Ok((parse_range(query)?, measure))
}

fn parse_range(query: &SelectionQuery) -> Result<TimeRange, AppError> {
    match query.range.as_deref() {
        Some(value) => value.parse::<TimeRange>().map_err(AppError::bad_request),
        None => Ok(TimeRange::default()),
    }
}
