//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use billing_types::{
    AppError, CardCharger, CustomerId, CustomerStore, DomainError, PaymentId, PaymentRequest,
    PaymentStore, RegistrationRequest,
};

use crate::{CustomerRegistry, PaymentProcessor};

/// Application state shared across handlers.
///
/// Both services are backed by the same repository adapter `R`.
pub struct AppState<R, C>
where
    R: CustomerStore + PaymentStore,
    C: CardCharger,
{
    pub registry: CustomerRegistry<Arc<R>>,
    pub processor: PaymentProcessor<Arc<R>, Arc<R>, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Domain(e) => match e {
                DomainError::InvalidPhoneNumber(_)
                | DomainError::UnsupportedCurrency(_)
                | DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
                DomainError::PhoneNumberTaken(_) => StatusCode::CONFLICT,
                DomainError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
                DomainError::ChargeDeclined(_) => StatusCode::PAYMENT_REQUIRED,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Register a new customer.
#[tracing::instrument(skip(state, req), fields(phone = %req.customer.phone_number))]
pub async fn register_customer<R: CustomerStore + PaymentStore, C: CardCharger>(
    State(state): State<Arc<AppState<R, C>>>,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.registry.register_new_customer(req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get customer by ID.
#[tracing::instrument(skip(state), fields(customer_id = %id))]
pub async fn get_customer<R: CustomerStore + PaymentStore, C: CardCharger>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id: CustomerId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid customer ID".into()))?;

    let customer = state.registry.get_customer(customer_id).await?;
    Ok(Json(customer))
}

/// Charge a card on behalf of a customer.
#[tracing::instrument(skip(state, req), fields(customer_id = %id, currency = %req.payment.currency))]
pub async fn charge_card<R: CustomerStore + PaymentStore, C: CardCharger>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id: CustomerId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid customer ID".into()))?;

    let payment = state.processor.charge_card(customer_id, req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: CustomerStore + PaymentStore, C: CardCharger>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()))?;

    let payment = state.processor.get_payment(payment_id).await?;
    Ok(Json(payment))
}
