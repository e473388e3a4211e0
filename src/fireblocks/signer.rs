// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Bearer-token construction for the custody API. Every outbound request
//! carries an RS256 JWT binding the API key, the request path and a hash of
//! the body, so tokens cannot be replayed against other resources.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::FireblocksError;

/// Tokens are short-lived; the platform rejects anything older than 30s.
const TOKEN_TTL_SECS: i64 = 25;

#[derive(Debug, Serialize)]
struct ApiTokenClaims<'a> {
    /// Request path the token is valid for, including any query string.
    uri: &'a str,
    nonce: String,
    iat: i64,
    exp: i64,
    /// API key.
    sub: &'a str,
    #[serde(rename = "bodyHash")]
    body_hash: String,
}

#[derive(Debug)]
pub struct RequestSigner {
    api_key: String,
    encoding_key: EncodingKey,
}

impl RequestSigner {
    pub fn new(api_key: impl Into<String>, private_key_pem: &str) -> Result<Self, FireblocksError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| FireblocksError::InvalidKey(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            encoding_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Signs `path` + `body` into a bearer token. GET requests sign an empty
    /// body.
    pub fn sign(&self, path: &str, body: &[u8]) -> Result<String, FireblocksError> {
        let iat = Utc::now().timestamp();
        let claims = ApiTokenClaims {
            uri: path,
            nonce: Uuid::new_v4().to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
            sub: &self.api_key,
            body_hash: sha256_hex(body),
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| FireblocksError::Signing(e.to_string()))
    }
}

fn sha256_hex(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_matches_known_vector() {
        // sha256("") and sha256("abc") reference values.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn claims_bind_path_key_and_body() {
        let claims = ApiTokenClaims {
            uri: "/v1/transactions",
            nonce: Uuid::new_v4().to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_000 + TOKEN_TTL_SECS,
            sub: "api-key-1",
            body_hash: sha256_hex(b"{}"),
        };
        let encoded = serde_json::to_value(&claims).unwrap();
        assert_eq!(encoded["uri"], "/v1/transactions");
        assert_eq!(encoded["sub"], "api-key-1");
        assert!(encoded["bodyHash"].as_str().unwrap().len() == 64);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn invalid_pem_is_rejected() {
        let err = RequestSigner::new("api-key-1", "not a pem").unwrap_err();
        assert!(matches!(err, FireblocksError::InvalidKey(_)));
    }
}
