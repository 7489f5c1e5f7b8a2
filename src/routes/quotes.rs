use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::dto::api::QuotesQuery;
use crate::forms::quote::{QuoteRequestForm, ReviewQuoteForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, quotes as quotes_service};

/// Public quote request; answers with the tracking code.
#[post("/quotes")]
pub async fn submit_quote(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<QuoteRequestForm>,
) -> Result<HttpResponse, ServiceError> {
    let quote = quotes_service::submit_quote(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(json!({
        "publicId": quote.public_id,
        "status": quote.status,
    })))
}

#[get("/quotes/track/{public_id}")]
pub async fn track_quote(
    public_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tracking = quotes_service::track_quote(repo.get_ref(), &public_id)?;
    Ok(HttpResponse::Ok().json(tracking))
}

#[get("/quotes")]
pub async fn list_quotes(
    params: web::Query<QuotesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = quotes_service::list_quotes(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/me/quotes")]
pub async fn list_my_quotes(
    params: web::Query<QuotesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = quotes_service::list_my_quotes(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/quotes/{quote_id}")]
pub async fn review_quote(
    quote_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReviewQuoteForm>,
) -> Result<HttpResponse, ServiceError> {
    let quote = quotes_service::review_quote(repo.get_ref(), &user, quote_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(quote))
}

#[delete("/quotes/{quote_id}")]
pub async fn delete_quote(
    quote_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    quotes_service::delete_quote(repo.get_ref(), &user, quote_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
