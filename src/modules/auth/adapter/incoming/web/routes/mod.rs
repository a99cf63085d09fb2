pub mod fetch_user;
pub mod forgot_password;
pub mod login_user;
pub mod refresh_token;
pub mod register_user;
pub mod reset_password;
pub mod verify_account;

pub use fetch_user::*;
pub use forgot_password::*;
pub use login_user::*;
pub use refresh_token::*;
pub use register_user::*;
pub use reset_password::*;
pub use verify_account::*;
