use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;

/// Rounds of Miller-Rabin used when searching for primes.
pub const MILLER_RABIN_ROUNDS: u32 = 40;

/// Probabilistically determine whether `num` is prime (Miller-Rabin).
pub fn is_prime(num: &BigUint, num_rounds: u32) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);

    if *num == two || *num == three {
        return true;
    }
    if *num <= one || num.is_even() {
        return false;
    }

    // Write num - 1 as d * 2^r with d odd.
    let num_minus_one = num - &one;
    let mut r = 0u32;
    let mut d = num_minus_one.clone();
    while d.is_even() {
        r += 1;
        d >>= 1;
    }

    let mut rng = rand::thread_rng();

    'witness: for _ in 0..num_rounds {
        let a = rng.gen_biguint_range(&two, &num_minus_one);
        let mut x = a.modpow(&d, num);

        if x == one || x == num_minus_one {
            continue;
        }

        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, num);
            if x == num_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Random odd integer with exactly `num_bits` bits (top and bottom bits forced).
pub fn generate_prime_candidate(num_bits: u64) -> BigUint {
    let mut rng = rand::thread_rng();
    rng.gen_biguint(num_bits) | (BigUint::one() << (num_bits - 1)) | BigUint::one()
}

/// Find a (probable) prime with the given number of bits.
pub fn find_prime(num_bits: u64) -> BigUint {
    loop {
        let candidate = generate_prime_candidate(num_bits);
        if is_prime(&candidate, MILLER_RABIN_ROUNDS) {
            return candidate;
        }
    }
}
