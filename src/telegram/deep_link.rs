//! Referral deep-link payloads
//!
//! Links look like `https://t.me/<bot>?start=<payload>` where the payload is
//! url-safe base64 without padding. Decoding failures are treated as "no
//! referral" rather than an error, so a garbled link still starts the bot.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Decodes a start payload into the referral code it carries.
///
/// Returns `None` for empty, non-base64 or non-utf8 payloads.
pub fn decode_payload(payload: &str) -> Option<String> {
    if payload.is_empty() {
        return None;
    }

    let bytes = match URL_SAFE_NO_PAD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Undecodable start payload {:?}: {}", payload, e);
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(_) => {
            log::warn!("Start payload {:?} is not valid utf-8", payload);
            None
        }
    }
}

/// Encodes a referral code into a start payload (used when handing out links).
pub fn encode_payload(code: &str) -> String {
    URL_SAFE_NO_PAD.encode(code.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_referral_code() {
        let payload = encode_payload("ref-42");
        assert_eq!(decode_payload(&payload).as_deref(), Some("ref-42"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(decode_payload(""), None);
        assert_eq!(decode_payload("!!!not base64!!!"), None);
    }
}
