//! Donation handlers: listing, CRUD, and reservation.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use foodshare_core::error::AppError;
use foodshare_entity::donation::{Donation, DonationCategory};
use foodshare_service::donation::ListDonationsQuery;

use crate::dto::request::{CreateDonationRequest, ListDonationsParams, UpdateDonationRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /donations
pub async fn list_donations(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    params: Result<Query<ListDonationsParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Donation>>>, ApiError> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let query = ListDonationsQuery::try_from(params)?;

    let list = state
        .donation_service
        .list_donations(auth.context(), &query)
        .await?;
    let message = list.message();

    Ok(Json(ApiResponse::with_message(list.donations, message)))
}

/// GET /donations/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonationCategory>>>, ApiError> {
    let categories = state.donation_service.list_categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let id = parse_uuid(&id)?;
    let donation = state.donation_service.get_donation(id).await?;
    Ok(Json(ApiResponse::with_message(donation, "Donation details")))
}

/// POST /donations
pub async fn create_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateDonationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Donation>>), ApiError> {
    let donation = state
        .donation_service
        .create_donation(auth.context(), req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            donation,
            "Donation created successfully",
        )),
    ))
}

/// PATCH /donations/{id}
pub async fn update_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let id = parse_uuid(&id)?;
    let Json(body) = body.map_err(|e| AppError::validation(e.body_text()))?;

    // A non-owner is refused before the fields are interpreted.
    state
        .donation_service
        .authorize_owner(auth.context(), id, "update")
        .await?;
    let req: UpdateDonationRequest = serde_json::from_value(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let donation = state
        .donation_service
        .update_donation(auth.context(), id, req.into())
        .await?;

    Ok(Json(ApiResponse::with_message(
        donation,
        "Donation updated successfully",
    )))
}

/// POST /donations/{id}/reserve
pub async fn reserve_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let id = parse_uuid(&id)?;
    let donation = state
        .donation_service
        .reserve_donation(auth.context(), id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        donation,
        "Donation reserved successfully",
    )))
}

/// POST /donations/{id}/cancel_reservation
pub async fn cancel_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let id = parse_uuid(&id)?;
    let donation = state
        .donation_service
        .cancel_reservation(auth.context(), id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        donation,
        "Reservation cancelled",
    )))
}

/// DELETE /donations/{id}
pub async fn delete_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state
        .donation_service
        .delete_donation(auth.context(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
