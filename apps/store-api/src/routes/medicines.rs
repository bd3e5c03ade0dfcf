//! # Medicine Routes
//!
//! `GET /medicines` — full catalog, name-ordered, with low-stock flags.
//! `POST /medicines` — upsert-by-name (create, or merge a restock).

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{MedicineDto, UpsertMedicineRequest, UpsertMedicineResponse};
use crate::error::ApiError;
use crate::services::catalog::{self, NewMedicine};
use crate::state::AppState;
use medstock_core::ValidationError;

pub fn router() -> Router<AppState> {
    Router::new().route("/medicines", get(list_medicines).post(upsert_medicine))
}

/// Missing required field → 400 naming the field, before any lookup.
fn require<T>(field: &str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ValidationError::Required {
            field: field.to_string(),
        }
        .into()
    })
}

async fn list_medicines(State(state): State<AppState>) -> Result<Json<Vec<MedicineDto>>, ApiError> {
    let medicines = catalog::list_catalog(&state.db).await?;
    Ok(Json(medicines.into_iter().map(MedicineDto::from).collect()))
}

async fn upsert_medicine(
    State(state): State<AppState>,
    Json(body): Json<UpsertMedicineRequest>,
) -> Result<(StatusCode, Json<UpsertMedicineResponse>), ApiError> {
    let (medicine, created) = catalog::upsert_medicine(
        &state.db,
        NewMedicine {
            name: require("name", body.name)?,
            category: require("category", body.category)?,
            price_paise: require("pricePaise", body.price_paise)?,
            quantity: require("quantity", body.quantity)?,
        },
    )
    .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((
        status,
        Json(UpsertMedicineResponse {
            created,
            medicine: MedicineDto::from(medicine),
        }),
    ))
}
