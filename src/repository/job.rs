//! Repository implementation for upholstery jobs.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        job::{Job, NewJob, UpdateJob},
        types::JobId,
    },
    models::job::{Job as DbJob, NewJob as DbNewJob, UpdateJob as DbUpdateJob},
    repository::{
        DieselRepository, JobListQuery, JobReader, JobWriter,
        errors::{RepositoryError, RepositoryResult},
        like_pattern,
    },
};

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let db_job = jobs::table
            .find(id.get())
            .first::<DbJob>(&mut conn)
            .optional()?;

        Ok(db_job.map(Job::try_from).transpose()?)
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)> {
        use crate::schema::{clients, jobs};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = jobs::table.into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(jobs::status.eq(status.as_str()));
            }

            if let Some(employee_id) = query.employee_id {
                items = items.filter(jobs::employee_id.eq(employee_id.get()));
            }

            if let Some(client_id) = query.client_id {
                items = items.filter(jobs::client_id.eq(client_id.get()));
            }

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                let matching_clients = clients::table
                    .filter(clients::name.like(pattern.clone()).escape('\\'))
                    .select(clients::id);
                items = items.filter(
                    jobs::title
                        .like(pattern.clone())
                        .escape('\\')
                        .or(jobs::description.assume_not_null().like(pattern).escape('\\'))
                        .or(jobs::client_id.eq_any(matching_clients)),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let jobs = items
            .order(jobs::created_at.desc())
            .then_order_by(jobs::id.desc())
            .load::<DbJob>(&mut conn)?
            .into_iter()
            .map(Job::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, jobs))
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let insertable: DbNewJob = new_job.into();

        let db_job = diesel::insert_into(jobs::table)
            .values(&insertable)
            .get_result::<DbJob>(&mut conn)?;

        Ok(Job::try_from(db_job)?)
    }

    fn update_job(&self, id: JobId, updates: &UpdateJob) -> RepositoryResult<Job> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let changeset = DbUpdateJob::new(updates, Utc::now().naive_utc());

        let db_job = diesel::update(jobs::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbJob>(&mut conn)?;

        Ok(Job::try_from(db_job)?)
    }

    fn delete_job(&self, id: JobId) -> RepositoryResult<()> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(jobs::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
