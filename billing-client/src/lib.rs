//! # Billing Client SDK
//!
//! A typed Rust client for the Billing API.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use billing_types::{
    Currency, Customer, CustomerCandidate, CustomerId, Payment, PaymentCandidate, PaymentId,
    PaymentRequest, RegistrationRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Billing API client.
pub struct BillingClient {
    base_url: String,
    http: Client,
}

impl BillingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Registers a new customer.
    pub async fn register_customer(
        &self,
        name: &str,
        phone_number: &str,
    ) -> Result<Customer, ClientError> {
        let req = RegistrationRequest {
            customer: CustomerCandidate {
                id: None,
                name: name.to_string(),
                phone_number: phone_number.to_string(),
            },
        };
        self.post("/api/customers", &req).await
    }

    /// Gets a customer by ID.
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ClientError> {
        self.get(&format!("/api/customers/{}", id)).await
    }

    /// Charges a card on behalf of a customer.
    pub async fn charge_card(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
        currency: Currency,
        source: &str,
        description: &str,
    ) -> Result<Payment, ClientError> {
        let req = PaymentRequest {
            payment: PaymentCandidate {
                customer_id: None,
                amount,
                currency,
                source: source.to_string(),
                description: description.to_string(),
            },
        };
        self.post(&format!("/api/customers/{}/payments", customer_id), &req)
            .await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, ClientError> {
        self.get(&format!("/api/payments/{}", id)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
