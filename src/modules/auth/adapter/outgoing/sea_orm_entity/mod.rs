pub mod referrals;
pub mod users;
pub mod verification_codes;
