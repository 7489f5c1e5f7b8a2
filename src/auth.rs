//! Identity of the caller, decoded from the auth service's JWT.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;
use crate::services::ServiceError;

/// Claims carried by the session token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        let data = decode::<AuthenticatedUser>(token, &key, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::default(), self, &key)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        log::error!("Server configuration is not registered");
        return Err(ServiceError::Internal);
    };

    let token = match bearer_token(req) {
        Some(token) => token,
        None => req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .ok_or(ServiceError::Unauthorized)?,
    };

    AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
        log::debug!("Rejected session token: {err}");
        ServiceError::Unauthorized
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "42".into(),
            email: "admin@tapiceria.es".into(),
            name: "Admin".into(),
            roles: vec!["portal_admin".into()],
            exp: 4_102_444_800,
        }
    }

    #[test]
    fn token_round_trips_with_same_secret() {
        let token = user().to_jwt("secret").unwrap();
        assert_eq!(AuthenticatedUser::from_jwt(&token, "secret").unwrap(), user());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = user().to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut expired = user();
        expired.exp = 1;
        let token = expired.to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_err());
    }
}
