use rand::{distributions::Alphanumeric, Rng};

const PREFIX_LEN: usize = 4;
const SUFFIX_LEN: usize = 6;
const FALLBACK_PREFIX: &str = "USR";

/// Builds `<NAME PREFIX><6 random chars>`, all uppercase ASCII alphanumerics.
///
/// Uniqueness is the caller's job: check against storage and regenerate on collision.
pub fn generate_referral_code(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(PREFIX_LEN)
        .collect::<String>()
        .to_ascii_uppercase();

    if prefix.is_empty() {
        prefix = FALLBACK_PREFIX.to_string();
    }

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase();

    format!("{}{}", prefix, suffix)
}
