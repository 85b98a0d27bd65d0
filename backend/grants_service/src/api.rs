//! Axum REST API handlers.
//!
//! Mutating routes identify the caller by the `x-caller` header; a missing
//! header is treated as an anonymous caller and rejected by the ledger.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::events::EventRecord;
use crate::ledger::Ledger;
use crate::token::InMemoryLedger;
use crate::types::{
    Account, Amount, Competition, CompetitionDraft, Currency, EntityKey, Grant, GrantDraft,
    Initiative, InitiativeDraft,
};

pub const CALLER_HEADER: &str = "x-caller";

pub struct ApiState {
    pub ledger: Ledger<InMemoryLedger>,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/grants", get(count_grants).post(create_grant))
        .route("/grants/:key", get(get_grant))
        .route("/grants/:key/milestones", get(grant_milestones))
        .route("/grants/:key/progress", post(progress_grant))
        .route("/grants/:key/reassign", post(reassign_grant))
        .route("/grants/:key/cancel", post(cancel_grant))
        .route("/grants/:key/complete", post(complete_grant))
        .route("/initiatives", get(count_initiatives).post(create_initiative))
        .route("/initiatives/:key", get(get_initiative))
        .route("/initiatives/:key/milestones", get(initiative_milestones))
        .route("/initiatives/:key/assign", post(assign_initiative))
        .route("/initiatives/:key/progress", post(progress_initiative))
        .route("/initiatives/:key/cancel", post(cancel_initiative))
        .route("/initiatives/:key/complete", post(complete_initiative))
        .route(
            "/competitions",
            get(count_competitions).post(create_competition),
        )
        .route("/competitions/:key", get(get_competition))
        .route("/competitions/:key/complete", post(complete_competition))
        .route("/competitions/:key/cancel", post(cancel_competition))
        .route("/withdrawals", post(withdraw))
        .route("/pool/:currency", get(pool_balance))
        .route("/events", get(get_events))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReceiverRequest {
    pub receiver: Account,
}

#[derive(Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct WinnersRequest {
    pub winners: Vec<Account>,
}

#[derive(Deserialize)]
pub struct WithdrawRequest {
    pub to: Account,
    pub amount: Amount,
    pub currency: Currency,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Serialize)]
pub struct MilestonesResponse {
    pub key: EntityKey,
    pub milestones: Vec<Amount>,
}

#[derive(Serialize)]
pub struct PoolResponse {
    pub currency: Currency,
    pub balance: Amount,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

// ─────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────

pub struct ApiError(LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LedgerError::Unauthorized => StatusCode::FORBIDDEN,
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::DuplicateKey(_)
            | LedgerError::NotActive(_)
            | LedgerError::MilestonesExhausted(_)
            | LedgerError::NotAssigned(_) => StatusCode::CONFLICT,
            LedgerError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::WinnersLengthInvalid { .. }
            | LedgerError::InvalidSchedule(_)
            | LedgerError::InvalidAmount
            | LedgerError::InvalidAccount
            | LedgerError::Overflow => StatusCode::BAD_REQUEST,
        };

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn caller(headers: &HeaderMap) -> Account {
    headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(Account::from)
        .unwrap_or_else(|| Account::from(""))
}

fn reason(body: Option<Json<CancelRequest>>) -> Option<String> {
    body.and_then(|Json(request)| request.reason)
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// Grants

/// `POST /grants`
pub async fn create_grant(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(draft): Json<GrantDraft>,
) -> ApiResult<Grant> {
    let grant = state.ledger.create_grant(&caller(&headers), draft).await?;
    Ok(Json(grant))
}

/// `POST /grants/:key/progress`
pub async fn progress_grant(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
) -> ApiResult<Grant> {
    Ok(Json(
        state.ledger.progress_grant(&caller(&headers), &key).await?,
    ))
}

/// `POST /grants/:key/reassign`
pub async fn reassign_grant(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    Json(body): Json<ReceiverRequest>,
) -> ApiResult<Grant> {
    Ok(Json(
        state
            .ledger
            .reassign_grant(&caller(&headers), &key, body.receiver)
            .await?,
    ))
}

/// `POST /grants/:key/cancel`, body `{ "reason": ... }` optional.
pub async fn cancel_grant(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    body: Option<Json<CancelRequest>>,
) -> ApiResult<Grant> {
    Ok(Json(
        state
            .ledger
            .cancel_grant(&caller(&headers), &key, reason(body))
            .await?,
    ))
}

/// `POST /grants/:key/complete`
pub async fn complete_grant(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
) -> ApiResult<Grant> {
    Ok(Json(
        state.ledger.complete_grant(&caller(&headers), &key).await?,
    ))
}

/// `GET /grants/:key`
pub async fn get_grant(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<EntityKey>,
) -> ApiResult<Grant> {
    Ok(Json(state.ledger.get_grant(&key).await?))
}

/// `GET /grants`
pub async fn count_grants(State(state): State<Arc<ApiState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.ledger.count_grants().await,
    })
}

/// `GET /grants/:key/milestones`
pub async fn grant_milestones(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<EntityKey>,
) -> ApiResult<MilestonesResponse> {
    let milestones = state.ledger.grant_milestones(&key).await?;
    Ok(Json(MilestonesResponse { key, milestones }))
}

// Initiatives

/// `POST /initiatives`
pub async fn create_initiative(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(draft): Json<InitiativeDraft>,
) -> ApiResult<Initiative> {
    Ok(Json(
        state
            .ledger
            .create_initiative(&caller(&headers), draft)
            .await?,
    ))
}

/// `POST /initiatives/:key/assign`
pub async fn assign_initiative(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    Json(body): Json<ReceiverRequest>,
) -> ApiResult<Initiative> {
    Ok(Json(
        state
            .ledger
            .assign_initiative(&caller(&headers), &key, body.receiver)
            .await?,
    ))
}

/// `POST /initiatives/:key/progress`
pub async fn progress_initiative(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
) -> ApiResult<Initiative> {
    Ok(Json(
        state
            .ledger
            .progress_initiative(&caller(&headers), &key)
            .await?,
    ))
}

/// `POST /initiatives/:key/cancel`
pub async fn cancel_initiative(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    body: Option<Json<CancelRequest>>,
) -> ApiResult<Initiative> {
    Ok(Json(
        state
            .ledger
            .cancel_initiative(&caller(&headers), &key, reason(body))
            .await?,
    ))
}

/// `POST /initiatives/:key/complete`
pub async fn complete_initiative(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
) -> ApiResult<Initiative> {
    Ok(Json(
        state
            .ledger
            .complete_initiative(&caller(&headers), &key)
            .await?,
    ))
}

/// `GET /initiatives/:key`
pub async fn get_initiative(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<EntityKey>,
) -> ApiResult<Initiative> {
    Ok(Json(state.ledger.get_initiative(&key).await?))
}

/// `GET /initiatives`
pub async fn count_initiatives(State(state): State<Arc<ApiState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.ledger.count_initiatives().await,
    })
}

/// `GET /initiatives/:key/milestones`
pub async fn initiative_milestones(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<EntityKey>,
) -> ApiResult<MilestonesResponse> {
    let milestones = state.ledger.initiative_milestones(&key).await?;
    Ok(Json(MilestonesResponse { key, milestones }))
}

// Competitions

/// `POST /competitions`
pub async fn create_competition(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(draft): Json<CompetitionDraft>,
) -> ApiResult<Competition> {
    Ok(Json(
        state
            .ledger
            .create_competition(&caller(&headers), draft)
            .await?,
    ))
}

/// `POST /competitions/:key/complete`, body `{ "winners": [...] }` in rank order.
pub async fn complete_competition(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    Json(body): Json<WinnersRequest>,
) -> ApiResult<Competition> {
    Ok(Json(
        state
            .ledger
            .complete_competition(&caller(&headers), &key, body.winners)
            .await?,
    ))
}

/// `POST /competitions/:key/cancel`
pub async fn cancel_competition(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(key): Path<EntityKey>,
    body: Option<Json<CancelRequest>>,
) -> ApiResult<Competition> {
    Ok(Json(
        state
            .ledger
            .cancel_competition(&caller(&headers), &key, reason(body))
            .await?,
    ))
}

/// `GET /competitions/:key`
pub async fn get_competition(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<EntityKey>,
) -> ApiResult<Competition> {
    Ok(Json(state.ledger.get_competition(&key).await?))
}

/// `GET /competitions`
pub async fn count_competitions(State(state): State<Arc<ApiState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.ledger.count_competitions().await,
    })
}

// Custody & audit

/// `POST /withdrawals`
pub async fn withdraw(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<WithdrawRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .ledger
        .withdraw(&caller(&headers), &body.to, body.amount, &body.currency)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /pool/:currency`
pub async fn pool_balance(
    State(state): State<Arc<ApiState>>,
    Path(currency): Path<Currency>,
) -> Json<PoolResponse> {
    let balance = state.ledger.pool_balance(&currency).await;
    Json(PoolResponse { currency, balance })
}

/// `GET /events`
///
/// Returns the journal of every successful operation, oldest first.
pub async fn get_events(State(state): State<Arc<ApiState>>) -> Json<EventsResponse> {
    let events = state.ledger.events().await;
    Json(EventsResponse {
        count: events.len(),
        events,
    })
}
