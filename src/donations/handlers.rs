use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateOrderRequest, CreateOrderResponse, SaveDonationRequest},
    repo::{Donation, DonationStatus, NewDonation},
};
use crate::{
    error::{AppError, AppJson, AppResult},
    response::ApiResponse,
    state::AppState,
};

pub fn donation_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/save-donation", post(save_donation))
        .route("/donations", get(list_donations))
}

#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreateOrderResponse>>)> {
    let order = payload.validate()?;
    let receipt = format!("rcpt_{}", Uuid::new_v4().simple());

    let provider_order = state
        .payments
        .create_order(order.amount_minor, &order.currency, &receipt)
        .await
        .map_err(AppError::Payment)?;

    let donation = state
        .donations
        .insert(NewDonation {
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            pan: order.pan,
            amount: order.amount,
            currency: order.currency,
            order_id: provider_order.id.clone(),
        })
        .await?;

    info!(donation_id = %donation.id, order_id = %donation.order_id, amount = donation.amount, "donation order created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreateOrderResponse {
            order_id: provider_order.id,
            amount: provider_order.amount,
            currency: provider_order.currency,
            key_id: state.payments.key_id().to_string(),
            donation_id: donation.id,
        })),
    ))
}

#[instrument(skip(state, payload))]
pub async fn save_donation(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveDonationRequest>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let confirmation = payload.validate()?;

    let donation = state
        .donations
        .find_by_order(&confirmation.order_id)
        .await?
        .ok_or_else(|| AppError::not_found("Donation"))?;

    if donation.status == DonationStatus::Paid
        && donation.payment_id.as_deref() == Some(confirmation.payment_id.as_str())
    {
        return Ok(Json(ApiResponse::data(donation).with_message("Donation already saved")));
    }

    let verified = state.payments.verify_signature(
        &confirmation.order_id,
        &confirmation.payment_id,
        &confirmation.signature,
    );
    if !verified {
        warn!(order_id = %confirmation.order_id, status = %donation.status, "payment signature mismatch");
        // An unverified payment id is never stored.
        if donation.status == DonationStatus::Created {
            state
                .donations
                .set_status(&confirmation.order_id, DonationStatus::Failed, None)
                .await?;
        }
        return Err(AppError::validation("Payment verification failed"));
    }

    if donation.status == DonationStatus::Paid {
        warn!(order_id = %confirmation.order_id, "second payment for a paid donation");
        return Err(AppError::Conflict("Donation already paid".into()));
    }

    let donation = state
        .donations
        .set_status(
            &confirmation.order_id,
            DonationStatus::Paid,
            Some(confirmation.payment_id),
        )
        .await?
        .ok_or_else(|| AppError::Conflict("Donation already paid".into()))?;

    info!(donation_id = %donation.id, order_id = %donation.order_id, "donation paid");
    Ok(Json(
        ApiResponse::data(donation).with_message("Donation saved successfully"),
    ))
}

#[instrument(skip(state))]
pub async fn list_donations(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Donation>>>> {
    Ok(Json(ApiResponse::data(state.donations.list().await?)))
}
