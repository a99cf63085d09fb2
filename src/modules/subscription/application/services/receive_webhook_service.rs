use async_trait::async_trait;
use tracing::{info, warn};

use super::WebhookSignatureVerifier;
use crate::subscription::application::ports::incoming::use_cases::{
    ContractEvent, ReceiveWebhookError, ReceiveWebhookUseCase,
};

pub struct ReceiveWebhookService {
    verifier: WebhookSignatureVerifier,
}

impl ReceiveWebhookService {
    pub fn new(verifier: WebhookSignatureVerifier) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl ReceiveWebhookUseCase for ReceiveWebhookService {
    async fn execute(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<ContractEvent, ReceiveWebhookError> {
        let Some(signature) = signature else {
            warn!("Webhook rejected: signature header missing");
            return Err(ReceiveWebhookError::InvalidSignature);
        };

        if !self.verifier.verify(body, signature) {
            warn!(body_len = body.len(), "Webhook rejected: signature mismatch");
            return Err(ReceiveWebhookError::InvalidSignature);
        }

        let event: ContractEvent = serde_json::from_slice(body)
            .map_err(|e| ReceiveWebhookError::InvalidPayload(e.to_string()))?;

        info!(
            contract_id = ?event.id,
            status = ?event.status,
            customer_id = ?event.customer_id,
            "Subscription contract webhook received"
        );
        Ok(event)
    }
}
