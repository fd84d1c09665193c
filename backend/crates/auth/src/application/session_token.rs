//! Session Token
//!
//! Cookie value format: `<session_id>.<base64url(hmac_sha256(secret, session_id))>`

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &[u8], session_id: &str) -> AuthResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AuthError::Internal(format!("Invalid session secret: {e}")))?;
    mac.update(session_id.as_bytes());
    Ok(mac)
}

/// Generate signed session token
pub fn sign(secret: &[u8], session_id: Uuid) -> AuthResult<String> {
    let session_id = session_id.to_string();
    let signature = mac_for(secret, &session_id)?.finalize().into_bytes();

    Ok(format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature)))
}

/// Parse and verify a session token
///
/// Returns `None` for malformed or badly signed tokens.
pub fn verify(secret: &[u8], token: &str) -> Option<Uuid> {
    let (session_id, signature_b64) = token.split_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac_for(secret, session_id).ok()?.verify_slice(&signature).ok()?;

    session_id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [42u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let id = Uuid::new_v4();
        let token = sign(&SECRET, id).unwrap();
        assert!(token.starts_with(&id.to_string()));
        assert_eq!(verify(&SECRET, &token), Some(id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&SECRET, Uuid::new_v4()).unwrap();
        assert_eq!(verify(&[7u8; 32], &token), None);
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = sign(&SECRET, Uuid::new_v4()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), signature);
        assert_eq!(verify(&SECRET, &forged), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(verify(&SECRET, ""), None);
        assert_eq!(verify(&SECRET, "no-dot"), None);
        assert_eq!(verify(&SECRET, "abc.!!!"), None);
    }
}
