use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::job::{Job as DomainJob, NewJob as DomainNewJob};
use crate::domain::types::{Cents, ClientId, EmployeeId, JobId, JobTitle, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::jobs)]
/// Diesel model for [`crate::domain::job::Job`].
pub struct Job {
    pub id: i32,
    pub client_id: i32,
    pub employee_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub price_cents: i64,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob<'a> {
    pub client_id: i32,
    pub employee_id: Option<i32>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub price_cents: i64,
    pub due_date: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateJob<'a> {
    pub client_id: i32,
    pub employee_id: Option<i32>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub price_cents: i64,
    pub due_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Job> for DomainJob {
    type Error = TypeConstraintError;

    fn try_from(job: Job) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::new(job.id)?,
            client_id: ClientId::new(job.client_id)?,
            employee_id: job.employee_id.map(EmployeeId::new).transpose()?,
            title: JobTitle::new(job.title)?,
            description: job.description,
            status: job.status.parse()?,
            price: Cents::new(job.price_cents)?,
            due_date: job.due_date,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewJob> for NewJob<'a> {
    fn from(job: &'a DomainNewJob) -> Self {
        Self {
            client_id: job.client_id.get(),
            employee_id: job.employee_id.map(EmployeeId::get),
            title: job.title.as_str(),
            description: job.description.as_deref(),
            status: job.status.as_str(),
            price_cents: job.price.get(),
            due_date: job.due_date,
        }
    }
}

impl<'a> UpdateJob<'a> {
    pub fn new(job: &'a DomainNewJob, updated_at: NaiveDateTime) -> Self {
        Self {
            client_id: job.client_id.get(),
            employee_id: job.employee_id.map(EmployeeId::get),
            title: job.title.as_str(),
            description: job.description.as_deref(),
            status: job.status.as_str(),
            price_cents: job.price.get(),
            due_date: job.due_date,
            updated_at,
        }
    }
}
