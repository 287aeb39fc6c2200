//! HMAC-based one-time-password derivation (RFC 4226 §5).
//!
//! Pure counter-to-code arithmetic; the time-step handling lives in the
//! account manager.

use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Derive a zero-padded numeric code from raw key bytes and a counter.
///
/// HMAC accepts keys of any length, so this never fails.
pub fn derive_code(key: &[u8], counter: u64, digits: u32) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&counter.to_be_bytes());
    let hmac_result = mac.finalize().into_bytes();

    // Dynamic truncation per RFC 4226 §5.3.
    let offset = (hmac_result[hmac_result.len() - 1] & 0x0f) as usize;
    let binary = ((hmac_result[offset] as u32 & 0x7f) << 24)
        | ((hmac_result[offset + 1] as u32) << 16)
        | ((hmac_result[offset + 2] as u32) << 8)
        | (hmac_result[offset + 3] as u32);

    let code = binary % 10u32.pow(digits);
    format!("{code:0>width$}", width = digits as usize)
}
