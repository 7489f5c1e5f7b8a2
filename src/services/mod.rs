//! Business workflows invoked by the HTTP routes.
//!
//! Services are generic over the repository traits so they can be exercised
//! against [`crate::repository::mock::MockRepository`] in tests.

use thiserror::Error;

use crate::auth::AuthenticatedUser;
use crate::domain::types::TypeConstraintError;
use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod employees;
pub mod jobs;
pub mod materials;
pub mod quotes;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthorized,

    #[error("insufficient permissions")]
    Forbidden,

    #[error("entity not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => {
                log::warn!("Write rejected by constraint: {message}");
                ServiceError::Conflict("El registro entra en conflicto con datos existentes".into())
            }
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::Internal
            }
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.field_errors())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

/// Checks whether `role` is present in the provided role list.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::AuthenticatedUser;
    use crate::{PORTAL_ADMIN_ROLE, PORTAL_CLIENT_ROLE};

    pub fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@tapiceria.es".to_string(),
            name: "Admin".to_string(),
            roles: vec![PORTAL_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    pub fn client_user(email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".to_string(),
            email: email.to_string(),
            name: "Cliente".to_string(),
            roles: vec![PORTAL_CLIENT_ROLE.to_string()],
            exp: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_become_conflicts() {
        let err: ServiceError =
            RepositoryError::ConstraintViolation("unique constraint: employees.email".into())
                .into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn missing_role_is_forbidden() {
        let user = test_support::client_user("ana@example.com");
        assert!(matches!(
            ensure_role(&user, crate::PORTAL_ADMIN_ROLE),
            Err(ServiceError::Forbidden)
        ));
        assert!(ensure_role(&test_support::admin_user(), crate::PORTAL_ADMIN_ROLE).is_ok());
    }
}
