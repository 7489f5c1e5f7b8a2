use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::ClientsQuery;
use crate::forms::client::ClientForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, clients as clients_service};

#[get("/clients")]
pub async fn list_clients(
    params: web::Query<ClientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = clients_service::list_clients(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/clients")]
pub async fn create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> Result<HttpResponse, ServiceError> {
    let client = clients_service::create_client(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Created().json(client))
}

#[put("/clients/{client_id}")]
pub async fn update_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> Result<HttpResponse, ServiceError> {
    let client =
        clients_service::update_client(repo.get_ref(), &user, client_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(client))
}

#[delete("/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    clients_service::delete_client(repo.get_ref(), &user, client_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
