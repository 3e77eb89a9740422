use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

const PKCE_LENGTH: usize = 64;
const PKCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// PKCE verifier and S256 challenge attached to an authorization request.
#[derive(Debug, Clone)]
pub struct PkcePair {
    code_verifier: String,
    code_challenge: String,
}

impl PkcePair {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let verifier: String = (0..PKCE_LENGTH)
            .map(|_| PKCE_CHARSET[rng.gen_range(0..PKCE_CHARSET.len())] as char)
            .collect();
        Self::from_verifier(verifier)
    }

    pub(crate) fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        let challenge = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        Self {
            code_verifier: verifier,
            code_challenge: challenge,
        }
    }

    /// Plain-text verifier, sent during the token exchange.
    pub fn code_verifier(&self) -> &str {
        &self.code_verifier
    }

    pub fn code_challenge(&self) -> &str {
        &self.code_challenge
    }

    pub fn method(&self) -> &'static str {
        "S256"
    }
}
