use axum::Json;
use axum::extract::Query;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::rsa;

const NUM_BITS_ERROR: &str = "num_bits should be a positive integer greater or equal to 2";

const DEFAULT_NUM_BITS: u64 = 1024;

#[derive(Deserialize)]
pub struct KeygenParams {
    num_bits: Option<String>,
}

/// Generate a public/private key pair.
///
/// `num_bits` sets the size in bits of the primes used; defaults to 1024.
pub async fn keygen(Query(params): Query<KeygenParams>) -> Result<Json<Value>, AppError> {
    let num_bits = match params.num_bits.as_deref() {
        None => DEFAULT_NUM_BITS,
        Some(raw) => parse_num_bits(raw)?,
    };

    // Prime search is CPU-bound; keep it off the reactor.
    let (public_key, private_key) = tokio::task::spawn_blocking(move || rsa::keygen(num_bits))
        .await
        .map_err(|e| AppError::Internal(format!("Key generation failed: {e}")))?;

    Ok(Json(json!({
        "public_key": public_key,
        "private_key": private_key,
    })))
}

fn parse_num_bits(raw: &str) -> Result<u64, AppError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(NUM_BITS_ERROR.to_string()));
    }
    let num_bits: u64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(NUM_BITS_ERROR.to_string()))?;
    if num_bits < 2 {
        return Err(AppError::BadRequest(NUM_BITS_ERROR.to_string()));
    }
    Ok(num_bits)
}

#[derive(Deserialize)]
pub struct EncryptParams {
    message: Option<String>,
    key: Option<String>,
}

/// Encrypt `message` with `key`.
pub async fn encrypt(Query(params): Query<EncryptParams>) -> Result<Json<Value>, AppError> {
    let (message, key) = match (params.message, params.key) {
        (Some(message), Some(key)) => (message, key),
        (message, key) => {
            let mut error = String::new();
            if message.is_none() {
                error.push_str("Message is not provided!\n");
            }
            if key.is_none() {
                error.push_str("Encryption key is not provided!\n");
            }
            return Err(AppError::BadRequest(error));
        }
    };

    let ciphertext = rsa::base64_encrypt(&message, &key).map_err(AppError::Internal)?;

    Ok(Json(json!({ "ciphertext": ciphertext })))
}

#[derive(Deserialize)]
pub struct DecryptParams {
    ciphertext: Option<String>,
    key: Option<String>,
}

/// Decrypt `ciphertext` with `key`.
pub async fn decrypt(Query(params): Query<DecryptParams>) -> Result<Json<Value>, AppError> {
    let (ciphertext, key) = match (params.ciphertext, params.key) {
        (Some(ciphertext), Some(key)) => (ciphertext, key),
        (ciphertext, key) => {
            let mut error = String::new();
            if ciphertext.is_none() {
                error.push_str("Ciphertext is not provided!\n");
            }
            if key.is_none() {
                error.push_str("Decryption key is not provided!\n");
            }
            return Err(AppError::BadRequest(error));
        }
    };

    let message = rsa::base64_decrypt(&ciphertext, &key).map_err(AppError::Internal)?;

    Ok(Json(json!({ "message": message })))
}
