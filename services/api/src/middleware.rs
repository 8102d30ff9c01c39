//! Authentication middleware for bearer token validation
//!
//! Tokens are issued by the external identity provider. This service only
//! verifies them and turns the `sub` claim into a [`Principal`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, warn};

use crate::{config::AppConfig, error::ApiError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id
    pub sub: String,
    /// Expiration time
    pub exp: u64,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authenticated principal for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(pub String);

impl Principal {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Token verifier built once at startup
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Verifier for HS256 tokens signed with `secret`
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: validation_for(Algorithm::HS256),
        }
    }

    /// Verifier for RS256 tokens signed by the holder of `pem`'s private key
    pub fn rs256(pem: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self {
            decoding_key: DecodingKey::from_rsa_pem(pem.as_bytes())?,
            validation: validation_for(Algorithm::RS256),
        })
    }

    /// Build the verifier described by the service configuration
    ///
    /// A public key wins over a shared secret. A public key that does not look
    /// like PEM text is read as a file path, relative to the working directory
    /// or to the crate root.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let verifier = match (&config.jwt_public_key, &config.jwt_secret) {
            (Some(public_key), _) => Self::rs256(&read_public_key(public_key)?)?,
            (None, Some(secret)) => Self::hs256(secret.as_bytes()),
            (None, None) => anyhow::bail!("no JWT verification key configured"),
        };

        let verifier = match &config.jwt_issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        };

        Ok(match &config.jwt_audience {
            Some(audience) => verifier.with_audience(audience),
            None => verifier,
        })
    }

    /// Require the `iss` claim to equal `issuer`
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Require the `aud` claim to contain `audience`
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.set_required_spec_claims(&["exp", "aud"]);
        self.validation.validate_aud = true;
        self
    }

    /// Verify `token` and return its principal
    pub fn verify(&self, token: &str) -> Result<Principal, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(Principal(data.claims.sub))
    }
}

/// Identity provider tokens usually carry an `aud` claim. It is only checked
/// once an expected audience is configured.
fn validation_for(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_aud = false;
    validation
}

fn read_public_key(public_key: &str) -> anyhow::Result<String> {
    if public_key.starts_with("-----BEGIN") {
        return Ok(public_key.to_string());
    }

    let pem = std::fs::read_to_string(public_key)
        .or_else(|_| {
            let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            path.push(public_key);
            std::fs::read_to_string(path)
        })
        .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?;

    Ok(pem.trim().to_string())
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries a valid bearer token, and
/// inserts the [`Principal`] into the request extensions otherwise.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        warn!("Request to {} without bearer token", req.uri().path());
        ApiError::Unauthorized
    })?;

    let principal = state.jwt_verifier.verify(bearer.token()).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    if principal.id().is_empty() {
        warn!("Token without subject rejected");
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
