use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::JobsQuery;
use crate::forms::job::JobForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, jobs as jobs_service};

#[get("/jobs")]
pub async fn list_jobs(
    params: web::Query<JobsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = jobs_service::list_jobs(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/jobs")]
pub async fn create_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<JobForm>,
) -> Result<HttpResponse, ServiceError> {
    let job = jobs_service::create_job(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Created().json(job))
}

#[put("/jobs/{job_id}")]
pub async fn update_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<JobForm>,
) -> Result<HttpResponse, ServiceError> {
    let job = jobs_service::update_job(repo.get_ref(), &user, job_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(job))
}

#[delete("/jobs/{job_id}")]
pub async fn delete_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    jobs_service::delete_job(repo.get_ref(), &user, job_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
