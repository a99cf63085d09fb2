use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-Shopify-Hmac-Sha256";

/// Subscription contract event as posted by the storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractEvent {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub admin_graphql_api_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub admin_graphql_api_customer_id: Option<String>,
    #[serde(default)]
    pub origin_order_id: Option<i64>,
    #[serde(default)]
    pub billing_policy: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery_policy: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReceiveWebhookError {
    #[error("Webhook signature is missing or invalid")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

#[async_trait]
pub trait ReceiveWebhookUseCase: Send + Sync {
    async fn execute(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<ContractEvent, ReceiveWebhookError>;
}
