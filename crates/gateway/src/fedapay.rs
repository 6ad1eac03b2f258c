//! REST client for the FedaPay transactions API.
//!
//! Amounts cross the wire in minor units (hundredths of a franc): multiplied
//! by 100 on the way out, divided by 100 on the way back.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GatewayConfig;
use crate::types::{CreateTransaction, GatewayTransaction, TransactionStatus};
use crate::{map_status, GatewayError, PaymentGateway};

/// HTTP request timeout for a single gateway call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the FedaPay REST API.
pub struct FedapayClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    callback_url: String,
}

/// Envelope wrapping every FedaPay response body.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Fields we read off a freshly created transaction.
#[derive(Debug, Deserialize)]
struct CreatedTransaction {
    id: i64,
    /// Hosted checkout page for the buyer.
    payment_url: String,
}

/// Fields we read off a transaction lookup.
#[derive(Debug, Deserialize)]
struct FetchedTransaction {
    status: String,
    /// Amount in minor units.
    amount: i64,
}

impl FedapayClient {
    /// Create a new client for the configured environment.
    pub fn new(config: &GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction failed");
        Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone(),
            callback_url: config.callback_url.clone(),
        }
    }

    /// Decode a JSON body, turning any non-2xx status into
    /// [`GatewayError::Api`] with the body text attached for the logs.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("(body unavailable)"));
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PaymentGateway for FedapayClient {
    async fn create_transaction(
        &self,
        request: &CreateTransaction,
    ) -> Result<GatewayTransaction, GatewayError> {
        let mut customer = serde_json::json!({ "id": request.customer_id });
        if let Some(phone) = &request.phone {
            customer["phone_number"] = serde_json::json!({ "number": phone });
        }

        let body = serde_json::json!({
            "description": request.description,
            "amount": request.amount * 100,
            "currency": "XOF",
            "callback_url": self.callback_url,
            "customer": customer,
            "payment_method": request.payment_method,
        });

        let response = self
            .client
            .post(format!("{}/transactions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let envelope: Envelope<CreatedTransaction> = Self::read_json(response).await?;
        let transaction = envelope.data;
        tracing::debug!(
            transaction_id = transaction.id,
            "Gateway accepted transaction"
        );

        Ok(GatewayTransaction {
            transaction_id: transaction.id.to_string(),
            payment_url: transaction.payment_url,
        })
    }

    async fn fetch_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatus, GatewayError> {
        let response = self
            .client
            .get(format!("{}/transactions/{}", self.base_url, transaction_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let envelope: Envelope<FetchedTransaction> = Self::read_json(response).await?;
        let transaction = envelope.data;

        Ok(TransactionStatus {
            status: map_status(&transaction.status),
            amount: transaction.amount / 100,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GatewayConfig {
        GatewayConfig {
            api_key: "sk_sandbox_test".to_string(),
            environment: "sandbox".to_string(),
            callback_url: "http://localhost:3000/payment/callback".to_string(),
            webhook_secret: None,
        }
    }

    #[test]
    fn new_does_not_panic() {
        let client = FedapayClient::new(&test_config());
        assert_eq!(client.base_url, "https://api-sandbox.fedapay.com/v1");
    }

    #[test]
    fn envelope_parses_created_transaction() {
        let raw = r#"{"data":{"id":204512,"status":"pending","amount":50000,
            "payment_url":"https://checkout.fedapay.com/pay/204512"}}"#;
        let envelope: Envelope<CreatedTransaction> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.id, 204512);
        assert_eq!(
            envelope.data.payment_url,
            "https://checkout.fedapay.com/pay/204512"
        );
    }

    #[test]
    fn envelope_parses_fetched_transaction() {
        let raw = r#"{"data":{"id":204512,"status":"approved","amount":50000}}"#;
        let envelope: Envelope<FetchedTransaction> = serde_json::from_str(raw).unwrap();
        assert_eq!(map_status(&envelope.data.status), griot_core::gateway::GatewayStatus::Approved);
        assert_eq!(envelope.data.amount / 100, 500);
    }
}
