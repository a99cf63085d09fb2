pub mod account_notifier;
pub mod email_sender;

pub use account_notifier::{AccountNotifier, NotificationError, Recipient};
pub use email_sender::{EmailSendError, EmailSender};
