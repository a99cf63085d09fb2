use actix_web::{post, web, HttpRequest, Responder};
use tracing::warn;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::shared::api::ApiResponse;
use crate::subscription::application::ports::incoming::use_cases::{
    ReceiveWebhookError, WEBHOOK_SIGNATURE_HEADER,
};
use crate::AppState;

/// Subscription contract webhook
///
/// The raw body must be signed with the shared webhook secret
/// (`base64(HMAC-SHA256)` in `X-Shopify-Hmac-Sha256`).
#[utoipa::path(
    post,
    path = "/api/v1/subscription/webhook/subscription",
    tag = "webhooks",
    request_body(content = String, content_type = "application/json"),
    params(("X-Shopify-Hmac-Sha256" = String, Header, description = "Body signature")),
    responses(
        (status = 200, description = "Event accepted", body = MessageResponse),
        (status = 400, description = "Signed body is not a contract event", body = ErrorResponse),
        (status = 403, description = "Missing or invalid signature", body = ErrorResponse),
    )
)]
#[post("/api/v1/subscription/webhook/subscription")]
pub async fn subscription_webhook_handler(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let signature = req
        .headers()
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match data.subscription.receive_webhook.execute(signature, &body).await {
        Ok(_) => ApiResponse::ok_message("Webhook received"),
        Err(ReceiveWebhookError::InvalidSignature) => {
            ApiResponse::forbidden("INVALID_SIGNATURE", "Webhook signature is missing or invalid")
        }
        Err(ReceiveWebhookError::InvalidPayload(e)) => {
            warn!(error = %e, "Signed webhook body could not be decoded");
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid webhook payload")
        }
    }
}
