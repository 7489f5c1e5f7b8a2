use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::EmployeesQuery;
use crate::forms::employee::EmployeeForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, employees as employees_service};

#[get("/employees")]
pub async fn list_employees(
    params: web::Query<EmployeesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = employees_service::list_employees(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/employees")]
pub async fn create_employee(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> Result<HttpResponse, ServiceError> {
    let employee = employees_service::create_employee(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Created().json(employee))
}

#[put("/employees/{employee_id}")]
pub async fn update_employee(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> Result<HttpResponse, ServiceError> {
    let employee =
        employees_service::update_employee(repo.get_ref(), &user, employee_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(employee))
}

#[delete("/employees/{employee_id}")]
pub async fn delete_employee(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    employees_service::delete_employee(repo.get_ref(), &user, employee_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
