//! Daily report handlers

use axum::extract::State;
use shared::error::{ApiResponse, AppResult};

use crate::api::extract::{ApiJson, ApiQuery};
use crate::auth::CurrentUser;
use crate::services::capture::{self, CaptureReceipt, CaptureRequest, TodayCapture};
use crate::services::reports::{
    self, DayFilters, DayQuery, ListQuery, MonthFilters, MonthQuery, ReportList, Summary,
};
use crate::state::AppState;

/// POST /api/reportes/diario - capture one shift
pub async fn capture(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(req): ApiJson<CaptureRequest>,
) -> AppResult<ApiResponse<CaptureReceipt>> {
    let receipt = capture::submit_daily_report(&state, &current, req).await?;
    Ok(ApiResponse::success_with_message("Captura guardada", receipt))
}

/// GET /api/reportes/diario/hoy - today's form for the caller's store
pub async fn today(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<ApiResponse<TodayCapture>> {
    let today = capture::today_capture(&state, &current).await?;
    Ok(ApiResponse::success(today))
}

/// GET /api/reportes - filtered rows plus totals
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> AppResult<ApiResponse<ReportList>> {
    let list = reports::list_reports(&state, &current, query).await?;
    Ok(ApiResponse::success(list))
}

/// GET /api/reportes/resumen-mes
pub async fn month_summary(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> AppResult<ApiResponse<Summary<MonthFilters>>> {
    let summary = reports::month_summary(&state, &current, query).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/reportes/resumen-dia (ADMIN)
pub async fn day_summary(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<DayQuery>,
) -> AppResult<ApiResponse<Summary<DayFilters>>> {
    let summary = reports::day_summary(&state, &current, query).await?;
    Ok(ApiResponse::success(summary))
}
