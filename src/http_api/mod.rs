use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Weekday};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    CalendarMatrix, EnrichedSchedule, PlanSelection, PlannedTask, PlannerConfig, RunSummary,
    Schedule, ScheduleError, TaskSpec, TeamPivot, TotalsSource, TotalsTable, WorkCalendar,
    WorkItem, append_totals, plan_tasks,
};

type SharedTotalsSource = Arc<dyn TotalsSource + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    totals_source: Option<SharedTotalsSource>,
    totals_cache: Arc<RwLock<Option<Arc<TotalsTable>>>>,
}

impl AppState {
    /// State without an external totals source; every scheme is zero-filled.
    pub fn new() -> Self {
        Self {
            totals_source: None,
            totals_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// State backed by a server-side totals source.
    ///
    /// The source's own layout decides the stay columns; a request's
    /// `config.totals` is ignored while a source is configured.
    pub fn with_totals_source(source: SharedTotalsSource) -> Self {
        Self {
            totals_source: Some(source),
            totals_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Totals are fetched from the source once per process and reused.
    fn totals(&self, requested_columns: &[String]) -> Result<Arc<TotalsTable>, ScheduleError> {
        let Some(source) = self.totals_source.as_ref() else {
            return Ok(Arc::new(TotalsTable::empty(requested_columns.to_vec())));
        };
        let table = self.cached_totals(source)?;
        if table.columns() != requested_columns {
            debug!(
                requested = ?requested_columns,
                served = ?table.columns(),
                "request totals layout overridden by server source"
            );
        }
        Ok(table)
    }

    fn cached_totals(
        &self,
        source: &SharedTotalsSource,
    ) -> Result<Arc<TotalsTable>, ScheduleError> {
        if let Some(cached) = self.totals_cache.read().as_ref() {
            return Ok(cached.clone());
        }
        let mut guard = self.totals_cache.write();
        if let Some(cached) = guard.as_ref() {
            return Ok(cached.clone());
        }
        let table = Arc::new(source.fetch()?);
        info!(schemes = table.scheme_count(), "cached stay totals");
        *guard = Some(table.clone());
        Ok(table)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::MissingColumn(_)
            | ScheduleError::InvalidDate { .. }
            | ScheduleError::InvalidConfig(_)
            | ScheduleError::InvalidData(_) => ApiError::Invalid(value.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                warn!(%message, "request failed");
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// `config.totals` only shapes the zero-filled columns when the server has no
/// totals source of its own.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub items: Vec<WorkItem>,
    pub config: PlannerConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub summary: RunSummary,
    pub schedule: EnrichedSchedule,
    pub calendar: TeamPivot,
    pub matrix: CalendarMatrix,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub tasks: Vec<TaskSpec>,
    pub selections: Vec<PlanSelection>,
    #[serde(default)]
    pub rest_day: Option<Weekday>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub tasks: Vec<PlannedTask>,
    pub shutdown_dates: BTreeMap<String, NaiveDate>,
    pub matrix: CalendarMatrix,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config/default", get(default_config))
        .route("/schedule", post(generate_schedule))
        .route("/plan", post(weekly_plan))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn default_config() -> Json<PlannerConfig> {
    Json(PlannerConfig::default())
}

async fn generate_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule = Schedule::generate(&request.items, &request.config)?;
    let totals = state.totals(&request.config.totals.columns)?;
    Ok(Json(ScheduleResponse {
        summary: schedule.summary(),
        schedule: append_totals(schedule.items(), &totals),
        calendar: schedule.team_pivot(),
        matrix: schedule.matrix(),
    }))
}

async fn weekly_plan(Json(request): Json<PlanRequest>) -> Result<Json<PlanResponse>, ApiError> {
    let calendar = request
        .rest_day
        .map(WorkCalendar::with_rest_day)
        .unwrap_or_default();
    let plan = plan_tasks(&request.tasks, &request.selections, &calendar)?;
    Ok(Json(PlanResponse {
        shutdown_dates: plan.shutdown_dates(),
        matrix: plan.matrix(),
        tasks: plan.tasks,
    }))
}
