pub mod keys;
pub mod primes;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::Zero;

use keys::{decode_key, encode_key, powmod, xgcd};
use primes::find_prime;

pub const PUBLIC_EXPONENT: u32 = 65_537;

/// All parameters of a freshly generated key pair.
pub struct KeyMaterial {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigInt,
    pub d: BigInt,
    pub phi: BigUint,
}

/// Generate the full parameter set: two random primes p and q, n = p*q,
/// phi = lcm(p-1, q-1), e = 65537, and d the Bezout coefficient of e mod phi.
pub fn initialize(num_bits: u64) -> KeyMaterial {
    let p = find_prime(num_bits);
    let q = find_prime(num_bits);
    let n = &p * &q;
    let phi = (&p - 1u32).lcm(&(&q - 1u32));
    let e = BigInt::from(PUBLIC_EXPONENT);
    let (_, d, _) = xgcd(&e, &BigInt::from(phi.clone()));

    KeyMaterial { p, q, n, e, d, phi }
}

/// Generate a pair of transport-encoded keys: (public, private).
pub fn keygen(num_bits: u64) -> (String, String) {
    let km = initialize(num_bits);
    (encode_key(&km.n, &km.e), encode_key(&km.n, &km.d))
}

/// Encrypt one chunk of little-endian plaintext bytes.
pub fn encrypt(plain: &[u8], modulus: &BigUint, exponent: &BigInt) -> Result<Vec<u8>, String> {
    let m = BigUint::from_bytes_le(plain);
    Ok(le_bytes(&powmod(&m, exponent, modulus)?))
}

/// Decrypt one chunk back into its little-endian plaintext bytes.
pub fn decrypt(cipher: &[u8], modulus: &BigUint, exponent: &BigInt) -> Result<Vec<u8>, String> {
    let c = BigUint::from_bytes_le(cipher);
    Ok(le_bytes(&powmod(&c, exponent, modulus)?))
}

/// Encrypt a message with a transport-encoded key. The message is split into
/// chunks one byte smaller than the modulus; each encrypted chunk is
/// base64url-encoded and the chunks are joined with `.`.
pub fn base64_encrypt(message: &str, key: &str) -> Result<String, String> {
    let (modulus, exponent) = decode_key(key)?;

    let chunk_len = (modulus.bits().div_ceil(8)).saturating_sub(1) as usize;
    if chunk_len == 0 {
        return Err("Key modulus is too small to encrypt with".to_string());
    }

    let chunks = message
        .as_bytes()
        .chunks(chunk_len)
        .map(|chunk| Ok(URL_SAFE.encode(encrypt(chunk, &modulus, &exponent)?)))
        .collect::<Result<Vec<_>, String>>()?;

    Ok(chunks.join("."))
}

/// Decrypt a `.`-joined base64url ciphertext with a transport-encoded key.
pub fn base64_decrypt(ciphertext: &str, key: &str) -> Result<String, String> {
    let (modulus, exponent) = decode_key(key)?;

    let mut plain = Vec::new();
    for chunk in ciphertext.split('.') {
        let raw = URL_SAFE
            .decode(chunk)
            .map_err(|e| format!("Invalid ciphertext chunk: {e}"))?;
        plain.extend(decrypt(&raw, &modulus, &exponent)?);
    }

    String::from_utf8(plain).map_err(|e| format!("Decrypted bytes are not valid UTF-8: {e}"))
}

// Minimal little-endian encoding; zero is the empty byte string.
fn le_bytes(n: &BigUint) -> Vec<u8> {
    if n.is_zero() { Vec::new() } else { n.to_bytes_le() }
}
