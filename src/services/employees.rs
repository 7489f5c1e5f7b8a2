//! Employee administration workflows.

use crate::PORTAL_ADMIN_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::employee::{Employee, EmployeeRole, NewEmployee};
use crate::domain::types::EmployeeId;
use crate::dto::api::{EmployeesQuery, parse_filter, parse_flag};
use crate::forms::employee::{EmployeeForm, EmployeePayload};
use crate::pagination::PageEnvelope;
use crate::repository::{EmployeeListQuery, EmployeeReader, EmployeeWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn list_employees<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: EmployeesQuery,
) -> ServiceResult<PageEnvelope<Employee>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let window = params.window();
    let mut query = EmployeeListQuery::default().paginate(window.page, window.per_page);

    if let Some(term) = window.search {
        query = query.search(term);
    }
    if let Some(role) = parse_filter::<EmployeeRole>("role", params.role.as_deref())? {
        query = query.role(role);
    }
    if let Some(active) = parse_flag("active", params.active.as_deref())? {
        query = query.active(active);
    }

    let (total, employees) = repo.list_employees(query)?;

    Ok(PageEnvelope::new(
        employees,
        total,
        window.page,
        window.per_page,
    ))
}

pub fn create_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let new_employee: NewEmployee = EmployeePayload::try_from(form)?.into();

    Ok(repo.create_employee(&new_employee)?)
}

pub fn update_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let employee_id = EmployeeId::new(employee_id).map_err(|_| ServiceError::NotFound)?;
    let updates: NewEmployee = EmployeePayload::try_from(form)?.into();

    Ok(repo.update_employee(employee_id, &updates)?)
}

/// Removes the employee; their jobs stay in place unassigned.
pub fn delete_employee<R>(repo: &R, user: &AuthenticatedUser, employee_id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let employee_id = EmployeeId::new(employee_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_employee(employee_id)?;
    log::info!("Employee {employee_id} deleted by {}", user.email);

    Ok(())
}
