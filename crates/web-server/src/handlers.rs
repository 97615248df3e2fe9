use crate::{error::AppError, AppState};
use analytics::{KpiReport, RetentionPoint, TableFilter, TrendPoint};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Raw `?year=&month=` query parameters. Each accepts an integer or the
/// literal `All`; absent means `All`.
#[derive(Debug, Deserialize, Default)]
pub struct FilterParams {
    year: Option<String>,
    month: Option<String>,
}

impl FilterParams {
    pub fn to_filter(&self) -> Result<TableFilter, AppError> {
        Ok(TableFilter::new(
            parse_selection("year", self.year.as_deref())?,
            parse_selection("month", self.month.as_deref())?,
        ))
    }
}

fn parse_selection<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.is_empty() || value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            AppError::BadRequest(format!("invalid {name} '{value}': expected an integer or 'All'"))
        }),
    }
}

/// The filter options the dashboard offers: distinct years and months
/// present anywhere in the table.
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
}

/// # GET /api/filters
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    Json(FiltersResponse {
        years: state.table.years(),
        months: state.table.months(),
    })
}

/// # GET /api/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<KpiReport>, AppError> {
    let filter = params.to_filter()?;
    Ok(Json(state.engine.compute_kpis(&state.table, &filter)))
}

/// # GET /api/revenue
pub async fn get_revenue(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    let filter = params.to_filter()?;
    Ok(Json(state.engine.revenue_trend(&state.table, &filter)))
}

/// # GET /api/retention
///
/// Always computed over the whole table: retention compares adjacent-month
/// cohorts across the full time span, so the year/month filter deliberately
/// does not apply here and any query parameters are ignored.
pub async fn get_retention(State(state): State<Arc<AppState>>) -> Json<Vec<RetentionPoint>> {
    Json(state.engine.retention(&state.table))
}
