use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

/// Extended Euclidean algorithm: returns `(gcd(a, b), x, y)` with
/// `a*x + b*y == gcd(a, b)`.
pub fn xgcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut a, mut b) = (a.clone(), b.clone());
    let (mut x, mut y) = (BigInt::zero(), BigInt::one());
    let (mut u, mut v) = (BigInt::one(), BigInt::zero());

    while !a.is_zero() {
        let q = &b / &a;
        let r = &b % &a;
        let m = &x - &u * &q;
        let n = &y - &v * &q;
        b = a;
        a = r;
        x = u;
        y = v;
        u = m;
        v = n;
    }

    (b, x, y)
}

/// `base ^ exp mod m`. A negative exponent is resolved through the modular
/// inverse of the base, which must exist.
pub fn powmod(base: &BigUint, exp: &BigInt, m: &BigUint) -> Result<BigUint, String> {
    if exp.is_negative() {
        let m_int = BigInt::from(m.clone());
        let (g, x, _) = xgcd(&BigInt::from(base.clone()), &m_int);
        if !g.is_one() {
            return Err("Modular inverse does not exist!".to_string());
        }
        let inv = ((&x % &m_int) + &m_int) % &m_int;
        let inv = inv
            .to_biguint()
            .ok_or_else(|| "Modular inverse does not exist!".to_string())?;
        let e = (-exp)
            .to_biguint()
            .ok_or_else(|| "Invalid exponent".to_string())?;
        Ok(inv.modpow(&e, m))
    } else {
        let e = exp
            .to_biguint()
            .ok_or_else(|| "Invalid exponent".to_string())?;
        Ok(base.modpow(&e, m))
    }
}

/// Encode a key as `base64url(modulus) "." base64url(exponent)`, both
/// little-endian, the exponent in signed two's complement.
pub fn encode_key(modulus: &BigUint, exponent: &BigInt) -> String {
    let mod_b64 = URL_SAFE.encode(modulus.to_bytes_le());
    let exp_b64 = URL_SAFE.encode(exponent.to_signed_bytes_le());
    format!("{mod_b64}.{exp_b64}")
}

/// Decode a key into its modulus and exponent.
pub fn decode_key(key: &str) -> Result<(BigUint, BigInt), String> {
    let invalid = || format!("`{key}` is not a valid key");

    let (mod_part, exp_part) = key.split_once('.').ok_or_else(invalid)?;
    let mod_bytes = URL_SAFE.decode(mod_part).map_err(|_| invalid())?;
    let exp_bytes = URL_SAFE.decode(exp_part).map_err(|_| invalid())?;

    Ok((
        BigUint::from_bytes_le(&mod_bytes),
        BigInt::from_signed_bytes_le(&exp_bytes),
    ))
}
