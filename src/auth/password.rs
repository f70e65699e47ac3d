// Salted password hashing — PBKDF2-HMAC-SHA256, 32-byte output.
//
// Encoded form: pbkdf2:sha256:{iterations}${salt_hex}${hash_hex}
//
// The iteration count travels with the hash, so it can be raised later
// without invalidating stored credentials.

use std::sync::OnceLock;

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// Default PBKDF2 iteration count for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

const SALT_BYTES: usize = 16;
const METHOD_PREFIX: &str = "pbkdf2:sha256:";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    hash_password_with_iterations(password, DEFAULT_ITERATIONS)
}

/// Hash a password with a fresh random salt and an explicit iteration count.
///
/// PBKDF2 needs at least one round; 0 is stored and run as 1.
pub fn hash_password_with_iterations(password: &str, iterations: u32) -> String {
    let iterations = iterations.max(1);
    let mut salt = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let derived = derive(password.as_bytes(), salt_hex.as_bytes(), iterations);
    format!("{METHOD_PREFIX}{iterations}${salt_hex}${}", hex::encode(derived))
}

/// Check `password` against an encoded hash. Malformed hashes never verify.
pub fn verify_password(encoded: &str, password: &str) -> bool {
    let Some((iterations, salt, expected)) = parse_hash(encoded) else {
        return false;
    };
    let derived = hex::encode(derive(password.as_bytes(), salt.as_bytes(), iterations));
    constant_time_eq(&derived, expected)
}

/// Iteration count of an encoded hash, if it is well formed.
pub fn hash_iterations(encoded: &str) -> Option<u32> {
    parse_hash(encoded).map(|(iterations, _, _)| iterations)
}

/// A well-formed hash no password derives to, costing the same as a real one.
///
/// Verifying against it lets a lookup miss take as long as a wrong password.
pub fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        format!(
            "{METHOD_PREFIX}{DEFAULT_ITERATIONS}${}${}",
            "0".repeat(SALT_BYTES * 2),
            "0".repeat(64)
        )
    })
}

/// Constant-time string comparison to prevent timing attacks.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn parse_hash(encoded: &str) -> Option<(u32, &str, &str)> {
    let rest = encoded.strip_prefix(METHOD_PREFIX)?;
    let mut parts = rest.splitn(3, '$');
    let iterations = parts.next()?.parse::<u32>().ok().filter(|&n| n > 0)?;
    let salt = parts.next()?;
    let hash = parts.next()?;
    Some((iterations, salt, hash))
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut out = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    out
}
