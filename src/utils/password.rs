use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use rand::Rng;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260000;
const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;
const HEADER: &str = "pbkdf2:sha256";

/// Valeur stockée pour les comptes créés automatiquement par /api/saveData.
/// Ce n'est pas un hash valide: aucun mot de passe ne peut la vérifier.
pub const SENTINEL_CREDENTIAL: &str = "!auto-created";

/// Hash valide (salt et clé à zéro, mêmes itérations) vérifié quand le compte
/// n'existe pas, pour que le login coûte autant dans tous les cas
pub const DUMMY_HASH: &str =
    "pbkdf2:sha256:260000$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid hash format")]
    Format,

    #[error("invalid iterations")]
    Iterations,

    #[error("failed to decode {0}")]
    Decode(&'static str),

    #[error("PBKDF2 failed: {0}")]
    Derive(String),
}

/// Hash un mot de passe au format pbkdf2:sha256:iterations$salt$hash
/// PBKDF2-HMAC-SHA256 avec 260000 itérations et un salt aléatoire de 16 bytes
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let key = derive(password, &salt, ITERATIONS, KEY_LENGTH)?;

    Ok(format!(
        "{}:{}${}${}",
        HEADER,
        ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash stocké
/// La comparaison finale est en temps constant
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let mut parts = stored_hash.split('$');
    let (Some(header), Some(salt_str), Some(hash_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(PasswordError::Format);
    };

    let iterations = header
        .strip_prefix(HEADER)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or(PasswordError::Format)?
        .parse::<u32>()
        .map_err(|_| PasswordError::Iterations)?;

    if iterations == 0 {
        return Err(PasswordError::Iterations);
    }

    let salt = URL_SAFE_NO_PAD
        .decode(salt_str)
        .map_err(|_| PasswordError::Decode("salt"))?;
    let expected = URL_SAFE_NO_PAD
        .decode(hash_str)
        .map_err(|_| PasswordError::Decode("hash"))?;

    if expected.is_empty() {
        return Err(PasswordError::Format);
    }

    let computed = derive(password, &salt, iterations, expected.len())?;

    Ok(computed.ct_eq(&expected).into())
}

fn derive(
    password: &str,
    salt: &[u8],
    iterations: u32,
    length: usize,
) -> Result<Vec<u8>, PasswordError> {
    let mut key = vec![0u8; length];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, &mut key)
        .map_err(|e| PasswordError::Derive(e.to_string()))?;
    Ok(key)
}
