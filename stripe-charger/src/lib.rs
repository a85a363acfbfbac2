//! # Stripe Charger
//!
//! HTTP adapter for the Stripe Charges API implementing the `CardCharger`
//! port. Charges are created with a form-encoded `POST /v1/charges` call
//! authenticated via the secret key.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use billing_types::{CardCharge, CardCharger, ChargerError, Currency};

const STRIPE_API_URL: &str = "https://api.stripe.com";

// ─────────────────────────────────────────────────────────────────────────────
// Minor-unit conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Converts an exact major-unit amount to the provider's minor units.
///
/// Rejects amounts with more precision than the currency carries
/// (e.g. USD 10.005) instead of rounding.
pub fn to_minor_units(amount: Decimal, currency: Currency) -> Result<i64, ChargerError> {
    let scale = 10i64.pow(currency.decimal_places());
    let scaled = amount.checked_mul(Decimal::from(scale)).ok_or_else(|| {
        ChargerError::InvalidRequest(format!("Amount {} out of range", amount))
    })?;

    if !scaled.fract().is_zero() {
        return Err(ChargerError::InvalidRequest(format!(
            "Amount {} has sub-{} precision",
            amount,
            currency.code()
        )));
    }

    scaled.to_i64().ok_or_else(|| {
        ChargerError::InvalidRequest(format!("Amount {} out of range", amount))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Stripe Charger
// ─────────────────────────────────────────────────────────────────────────────

/// Card charger backed by the Stripe Charges API.
pub struct StripeCharger {
    base_url: String,
    secret_key: String,
    http: Client,
}

#[derive(Deserialize)]
struct ChargeResponse {
    paid: bool,
}

impl StripeCharger {
    /// Creates a charger against the live Stripe API.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_base_url(secret_key, STRIPE_API_URL)
    }

    /// Creates a charger against a custom endpoint (for testing).
    pub fn with_base_url(secret_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CardCharger for StripeCharger {
    #[tracing::instrument(skip(self, source), fields(currency = %currency))]
    async fn charge_card(
        &self,
        source: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<CardCharge, ChargerError> {
        let minor_units = to_minor_units(amount, currency)?;

        let form = [
            ("amount", minor_units.to_string()),
            ("currency", currency.code().to_lowercase()),
            ("source", source.to_string()),
            ("description", description.to_string()),
        ];

        let resp = self
            .http
            .post(format!("{}/v1/charges", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| ChargerError::Unavailable(e.to_string()))?;

        let status = resp.status();

        // Stripe signals a declined card with 402; everything else
        // non-successful is a provider fault.
        if status == StatusCode::PAYMENT_REQUIRED {
            return Ok(CardCharge::declined());
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChargerError::Provider(format!(
                "Stripe returned {}: {}",
                status, body
            )));
        }

        let charge: ChargeResponse = resp
            .json()
            .await
            .map_err(|e| ChargerError::Provider(format!("Malformed charge response: {}", e)))?;

        if charge.paid {
            Ok(CardCharge::debited())
        } else {
            Ok(CardCharge::declined())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
