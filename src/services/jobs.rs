//! Upholstery job (trabajo) workflows.

use crate::PORTAL_ADMIN_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::job::{Job, JobStatus, NewJob};
use crate::domain::types::{ClientId, EmployeeId, JobId};
use crate::dto::api::{JobsQuery, parse_filter};
use crate::forms::{FormError, job::JobForm};
use crate::pagination::PageEnvelope;
use crate::repository::{ClientReader, EmployeeReader, JobListQuery, JobReader, JobWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn list_jobs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: JobsQuery,
) -> ServiceResult<PageEnvelope<Job>>
where
    R: JobReader + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let window = params.window();
    let mut query = JobListQuery::default().paginate(window.page, window.per_page);

    if let Some(term) = window.search {
        query = query.search(term);
    }
    if let Some(status) = parse_filter::<JobStatus>("status", params.status.as_deref())? {
        query = query.status(status);
    }
    if let Some(employee_id) = parse_filter::<i32>("employeeId", params.employee_id.as_deref())? {
        let employee_id =
            EmployeeId::new(employee_id).map_err(|_| FormError::InvalidEmployeeId)?;
        query = query.employee(employee_id);
    }
    if let Some(client_id) = parse_filter::<i32>("clientId", params.client_id.as_deref())? {
        let client_id = ClientId::new(client_id).map_err(|_| FormError::InvalidClientId)?;
        query = query.client(client_id);
    }

    let (total, jobs) = repo.list_jobs(query)?;

    Ok(PageEnvelope::new(jobs, total, window.page, window.per_page))
}

/// Confirms the client and the assigned employee exist.
fn check_references<R>(repo: &R, job: &NewJob) -> ServiceResult<()>
where
    R: ClientReader + EmployeeReader + ?Sized,
{
    if repo.get_client_by_id(job.client_id)?.is_none() {
        return Err(FormError::InvalidClientId.into());
    }

    if let Some(employee_id) = job.employee_id
        && repo.get_employee_by_id(employee_id)?.is_none()
    {
        return Err(FormError::InvalidEmployeeId.into());
    }

    Ok(())
}

pub fn create_job<R>(repo: &R, user: &AuthenticatedUser, form: JobForm) -> ServiceResult<Job>
where
    R: ClientReader + EmployeeReader + JobWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let new_job = NewJob::try_from(form)?;
    check_references(repo, &new_job)?;

    let job = repo.create_job(&new_job)?;
    log::info!("Job {} created for client {}", job.id, job.client_id);

    Ok(job)
}

pub fn update_job<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    form: JobForm,
) -> ServiceResult<Job>
where
    R: ClientReader + EmployeeReader + JobWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;
    let updates = NewJob::try_from(form)?;
    check_references(repo, &updates)?;

    Ok(repo.update_job(job_id, &updates)?)
}

pub fn delete_job<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<()>
where
    R: JobWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let job_id = JobId::new(job_id).map_err(|_| ServiceError::NotFound)?;
    repo.delete_job(job_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::client::Client;
    use crate::domain::types::{Cents, JobTitle, PersonName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::admin_user;

    fn form(employee_id: Option<i32>) -> JobForm {
        JobForm {
            client_id: 1,
            employee_id,
            title: "Tapizar cabecero".into(),
            description: None,
            status: None,
            price: 25_000,
            due_date: None,
        }
    }

    fn sample_client() -> Client {
        Client {
            id: ClientId::new(1).expect("valid id"),
            name: PersonName::new("Elena").expect("valid name"),
            email: None,
            phone: None,
            address: None,
            active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn sample_job() -> Job {
        Job {
            id: JobId::new(10).expect("valid id"),
            client_id: ClientId::new(1).expect("valid id"),
            employee_id: None,
            title: JobTitle::new("Tapizar cabecero").expect("valid title"),
            description: None,
            status: JobStatus::Pending,
            price: Cents::new(25_000).expect("valid price"),
            due_date: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn unknown_client_is_rejected_before_insert() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().times(1).returning(|_| Ok(None));
        repo.expect_create_job().times(0);

        let result = create_job(&repo, &admin_user(), form(None));

        match result {
            Err(ServiceError::Validation(fields)) => assert!(fields.contains_key("clientId")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_employee_is_rejected_before_insert() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_client())));
        repo.expect_get_employee_by_id().times(1).returning(|_| Ok(None));
        repo.expect_create_job().times(0);

        let result = create_job(&repo, &admin_user(), form(Some(4)));

        match result {
            Err(ServiceError::Validation(fields)) => assert!(fields.contains_key("employeeId")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_with_existing_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_client())));
        repo.expect_create_job()
            .times(1)
            .returning(|_| Ok(sample_job()));

        let job = create_job(&repo, &admin_user(), form(None)).expect("should create");
        assert_eq!(job.id.get(), 10);
    }

    #[test]
    fn list_filters_by_employee() {
        let mut repo = MockRepository::new();
        repo.expect_list_jobs()
            .withf(|query| {
                query.employee_id.map(EmployeeId::get) == Some(3)
                    && query.status == Some(JobStatus::InProgress)
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let params = JobsQuery {
            status: Some("in_progress".into()),
            employee_id: Some("3".into()),
            ..Default::default()
        };

        list_jobs(&repo, &admin_user(), params).expect("should list");
    }
}
