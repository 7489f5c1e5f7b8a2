//! HTTP handlers and the mapping of service errors to responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tera::{Context, Tera};

use crate::forms::FieldErrors;
use crate::services::ServiceError;

pub mod clients;
pub mod employees;
pub mod jobs;
pub mod main;
pub mod materials;
pub mod quotes;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a FieldErrors>,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Form(_)
            | ServiceError::Validation(_)
            | ServiceError::TypeConstraint(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Unauthorized => ErrorBody {
                message: "Debes iniciar sesión",
                fields: None,
            },
            ServiceError::Forbidden => ErrorBody {
                message: "No tienes permisos para esta acción",
                fields: None,
            },
            ServiceError::NotFound => ErrorBody {
                message: "Registro no encontrado",
                fields: None,
            },
            ServiceError::Form(message) | ServiceError::Conflict(message) => ErrorBody {
                message,
                fields: None,
            },
            ServiceError::Validation(fields) => ErrorBody {
                message: "Revisa los campos del formulario",
                fields: Some(fields),
            },
            ServiceError::TypeConstraint(_) => ErrorBody {
                message: "Datos inválidos",
                fields: None,
            },
            ServiceError::Internal => ErrorBody {
                message: "Error interno del servidor",
                fields: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Renders a Tera template, answering 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn validation_errors_carry_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("email".into(), vec!["Correo electrónico inválido".into()]);
        let response = ServiceError::Validation(fields).error_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["fields"]["email"][0], "Correo electrónico inválido");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ServiceError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ServiceError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ServiceError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
