pub mod account;
pub mod referral_code;
pub mod verification_codes;

pub use referral_code::generate_referral_code;
pub use verification_codes::{VerificationCodeError, VerificationCodeService};
