use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::email::application::ports::outgoing::{
    AccountNotifier, EmailSender, NotificationError, Recipient,
};

/// Renders account notices as plain text and hands them to an [`EmailSender`].
#[derive(Clone)]
pub struct AccountEmailService {
    sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl fmt::Debug for AccountEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl AccountEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, frontend_url: impl Into<String>) -> Self {
        Self {
            sender,
            frontend_url: frontend_url.into(),
        }
    }

    fn link(&self, path: &str, email: &str, code: &str) -> Result<Url, NotificationError> {
        let base = format!("{}/{}", self.frontend_url.trim_end_matches('/'), path);
        Url::parse_with_params(&base, &[("email", email), ("code", code)])
            .map_err(|e| NotificationError::InvalidLink(e.to_string()))
    }

    async fn deliver(
        &self,
        recipient: &Recipient,
        subject: &str,
        body: String,
    ) -> Result<(), NotificationError> {
        self.sender
            .send_email(&recipient.email, subject, &body)
            .await
            .map_err(|e| NotificationError::EmailSendingFailed(e.to_string()))
    }
}

#[async_trait]
impl AccountNotifier for AccountEmailService {
    async fn send_verification_code(
        &self,
        recipient: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError> {
        let link = self.link("verify-account", &recipient.email, code)?;
        let body = format!(
            "Hi {},\n\nYour verification code is: {}\n\nOr confirm your account here:\n{}\n",
            recipient.name, code, link
        );

        self.deliver(recipient, "Verify your account", body).await
    }

    async fn send_password_reset_code(
        &self,
        recipient: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError> {
        let link = self.link("reset-password", &recipient.email, code)?;
        let body = format!(
            "Hi {},\n\nYour password reset code is: {}\n\nOr reset it here:\n{}\n\nIf you did not ask for this, ignore this email.\n",
            recipient.name, code, link
        );

        self.deliver(recipient, "Reset your password", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::application::ports::outgoing::EmailSendError;
    use mockall::mock;

    mock! {
        pub Sender {}
        #[async_trait]
        impl EmailSender for Sender {
            async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError>;
        }
    }

    fn alice() -> Recipient {
        Recipient {
            name: "Alice".to_string(),
            email: "alice+shop@x.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_verification_notice_carries_code_and_encoded_link() {
        let mut sender = MockSender::new();
        sender
            .expect_send_email()
            .withf(|to, subject, body| {
                to == "alice+shop@x.com"
                    && subject == "Verify your account"
                    && body.contains("AbCdE12345")
                    && body.contains(
                        "https://app.example.com/verify-account?email=alice%2Bshop%40x.com&code=AbCdE12345",
                    )
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AccountEmailService::new(Arc::new(sender), "https://app.example.com/");

        service
            .send_verification_code(&alice(), "AbCdE12345")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reset_notice_uses_reset_path() {
        let mut sender = MockSender::new();
        sender
            .expect_send_email()
            .withf(|_, subject, body| {
                subject == "Reset your password" && body.contains("/reset-password?email=")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AccountEmailService::new(Arc::new(sender), "https://app.example.com");

        service
            .send_password_reset_code(&alice(), "ZZZZZ99999")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sender_failure_is_reported() {
        let mut sender = MockSender::new();
        sender
            .expect_send_email()
            .returning(|_, _, _| Err(EmailSendError::TransportFailed("421".to_string())));

        let service = AccountEmailService::new(Arc::new(sender), "https://app.example.com");
        let err = service
            .send_verification_code(&alice(), "code")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::EmailSendingFailed(msg) if msg.contains("421")));
    }

    #[tokio::test]
    async fn test_bad_frontend_url_is_rejected_before_sending() {
        let service = AccountEmailService::new(Arc::new(MockSender::new()), "not a url");

        let err = service
            .send_verification_code(&alice(), "code")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::InvalidLink(_)));
    }
}
