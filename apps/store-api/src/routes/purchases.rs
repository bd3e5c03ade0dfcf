//! # Purchase Routes
//!
//! `GET  /purchases?date=`         — calendar-day ledger, newest first
//! `GET  /purchases/summary?date=` — per-day aggregate
//! `POST /purchases`               — create (stock reconciliation)
//! `PUT  /purchases/:id`           — edit (restore + revalidate + consume)

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::dto::{DailySummaryDto, LedgerQuery, PurchaseDto, PurchaseRequest};
use crate::error::ApiError;
use crate::services::purchases::{self, PurchaseDraft};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases).post(create_purchase))
        .route("/purchases/summary", get(daily_summary))
        .route("/purchases/:id", put(update_purchase))
}

fn draft_from(body: PurchaseRequest) -> PurchaseDraft {
    PurchaseDraft {
        customer_name: body.customer_name,
        items: body.medicines.into_iter().map(Into::into).collect(),
        discount_paise: body.discount_paise,
        due_paise: body.due_paise,
        payment_mode: body.payment_mode,
        date: body.date,
    }
}

async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<Vec<PurchaseDto>>, ApiError> {
    let (_, purchases) = purchases::ledger_for_day(&state.db, query.date).await?;
    Ok(Json(purchases.into_iter().map(PurchaseDto::from).collect()))
}

async fn daily_summary(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<DailySummaryDto>, ApiError> {
    let (date, summary) = purchases::summary_for_day(&state.db, query.date).await?;
    Ok(Json(DailySummaryDto::new(date, summary)))
}

async fn create_purchase(
    State(state): State<AppState>,
    Json(body): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseDto>), ApiError> {
    let purchase = purchases::create_purchase(&state.db, draft_from(body)).await?;
    Ok((StatusCode::CREATED, Json(PurchaseDto::from(purchase))))
}

async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<PurchaseDto>, ApiError> {
    let purchase = purchases::update_purchase(&state.db, &id, draft_from(body)).await?;
    Ok(Json(PurchaseDto::from(purchase)))
}
