use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::MaterialsQuery;
use crate::forms::material::MaterialForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, materials as materials_service};

/// Answers with a bare JSON array; clients page it themselves.
#[get("/materials")]
pub async fn list_materials(
    params: web::Query<MaterialsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let materials = materials_service::list_materials(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(materials))
}

#[post("/materials")]
pub async fn create_material(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MaterialForm>,
) -> Result<HttpResponse, ServiceError> {
    let material = materials_service::create_material(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Created().json(material))
}

#[put("/materials/{material_id}")]
pub async fn update_material(
    material_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MaterialForm>,
) -> Result<HttpResponse, ServiceError> {
    let material =
        materials_service::update_material(repo.get_ref(), &user, material_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(material))
}

#[delete("/materials/{material_id}")]
pub async fn delete_material(
    material_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    materials_service::delete_material(repo.get_ref(), &user, material_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
