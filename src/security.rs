//! Per-session anti-forgery token.
//!
//! The token lives in the signed session cookie; every state-reading or
//! state-changing API call must echo it back as the `nonce` form field.

use actix_session::{Session, SessionGetError, SessionInsertError};
use uuid::Uuid;

const NONCE_KEY: &str = "anti_forgery_token";

/// Returns the session token, creating one on first use.
pub fn issue_nonce(session: &Session) -> Result<String, SessionInsertError> {
    if let Ok(Some(existing)) = session.get::<String>(NONCE_KEY) {
        return Ok(existing);
    }
    let nonce = Uuid::new_v4().simple().to_string();
    session.insert(NONCE_KEY, &nonce)?;
    Ok(nonce)
}

fn stored_nonce(session: &Session) -> Result<Option<String>, SessionGetError> {
    session.get::<String>(NONCE_KEY)
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks a submitted token against the session; no session means no match.
pub fn verify_nonce(session: &Session, candidate: &str) -> bool {
    match stored_nonce(session) {
        Ok(Some(expected)) => {
            !candidate.is_empty() && constant_time_eq(expected.as_bytes(), candidate.as_bytes())
        }
        Ok(None) => false,
        Err(err) => {
            log::error!("Failed to read session token: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_same_length_and_bytes() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
