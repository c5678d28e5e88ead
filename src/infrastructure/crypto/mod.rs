use rand::Rng;
use rand::distributions::Alphanumeric;

const GENERATED_PASSWORD_LEN: usize = 20;

// Minimum cost under test.
const HASH_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

/// bcrypt at the library's default cost. The salt is embedded in the hash.
/// Only the first 72 bytes of `plain` take part; longer input is refused by
/// `validate_password` before it gets here.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    Ok(bcrypt::hash(plain, HASH_COST)?)
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not valid bcrypt");
            false
        }
    }
}

pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
