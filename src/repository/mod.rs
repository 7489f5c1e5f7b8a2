use crate::{
    db::{DbConnection, DbPool},
    domain::{
        client::{Client, NewClient, UpdateClient},
        employee::{Employee, EmployeeRole, NewEmployee, UpdateEmployee},
        job::{Job, JobStatus, NewJob, UpdateJob},
        material::{Material, MaterialCategory, NewMaterial, UpdateMaterial},
        quote::{NewQuote, Quote, QuoteReview, QuoteStatus},
        types::{ClientId, EmailAddress, EmployeeId, JobId, MaterialId, PublicId, QuoteId},
    },
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod employee;
pub mod errors;
pub mod job;
pub mod material;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod quote;

/// Diesel-backed repository shared by every entity.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip. Saturates at `i64::MAX`, which SQLite answers with an empty page.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1)
            .checked_mul(self.per_page)
            .and_then(|rows| i64::try_from(rows).ok())
            .unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Builds the `%term%` pattern used by the free-text search.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

macro_rules! list_query_common {
    ($name:ident) => {
        impl $name {
            pub fn search(mut self, term: impl Into<String>) -> Self {
                self.search = Some(term.into());
                self
            }

            pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
                self.pagination = Some(Pagination { page, per_page });
                self
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub active: Option<bool>,
    pub pagination: Option<Pagination>,
}

list_query_common!(ClientListQuery);

impl ClientListQuery {
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
    pub role: Option<EmployeeRole>,
    pub active: Option<bool>,
    pub pagination: Option<Pagination>,
}

list_query_common!(EmployeeListQuery);

impl EmployeeListQuery {
    pub fn role(mut self, role: EmployeeRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialListQuery {
    pub search: Option<String>,
    pub category: Option<MaterialCategory>,
    pub active: Option<bool>,
    pub pagination: Option<Pagination>,
}

list_query_common!(MaterialListQuery);

impl MaterialListQuery {
    pub fn category(mut self, category: MaterialCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteListQuery {
    pub search: Option<String>,
    pub status: Option<QuoteStatus>,
    pub email: Option<EmailAddress>,
    pub pagination: Option<Pagination>,
}

list_query_common!(QuoteListQuery);

impl QuoteListQuery {
    pub fn status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the list to quotes requested from one address.
    pub fn email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub employee_id: Option<EmployeeId>,
    pub client_id: Option<ClientId>,
    pub pagination: Option<Pagination>,
}

list_query_common!(JobListQuery);

impl JobListQuery {
    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    fn count_client_jobs(&self, id: ClientId) -> RepositoryResult<usize>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>>;
    fn list_employees(&self, query: EmployeeListQuery)
    -> RepositoryResult<(usize, Vec<Employee>)>;
}

pub trait EmployeeWriter {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee>;
    /// Removes the employee and unassigns their jobs.
    fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
}

pub trait MaterialReader {
    fn get_material_by_id(&self, id: MaterialId) -> RepositoryResult<Option<Material>>;
    fn list_materials(&self, query: MaterialListQuery)
    -> RepositoryResult<(usize, Vec<Material>)>;
}

pub trait MaterialWriter {
    fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material>;
    fn update_material(
        &self,
        id: MaterialId,
        updates: &UpdateMaterial,
    ) -> RepositoryResult<Material>;
    fn delete_material(&self, id: MaterialId) -> RepositoryResult<()>;
}

pub trait QuoteReader {
    fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>>;
    fn get_quote_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Quote>>;
    fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<Quote>)>;
}

pub trait QuoteWriter {
    fn create_quote(&self, new_quote: &NewQuote) -> RepositoryResult<Quote>;
    fn review_quote(&self, id: QuoteId, review: &QuoteReview) -> RepositoryResult<Quote>;
    fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
}

pub trait JobWriter {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
    fn update_job(&self, id: JobId, updates: &UpdateJob) -> RepositoryResult<Job>;
    fn delete_job(&self, id: JobId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offsets_are_one_based() {
        let first = Pagination { page: 1, per_page: 10 };
        let third = Pagination { page: 3, per_page: 10 };
        let zero = Pagination { page: 0, per_page: 5 };
        assert_eq!(first.offset(), 0);
        assert_eq!(third.offset(), 20);
        assert_eq!(zero.offset(), 0);
        assert_eq!(third.limit(), 10);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let last = Pagination { page: usize::MAX, per_page: 10 };
        let wide = Pagination { page: usize::MAX / 4, per_page: 2 };
        assert_eq!(last.offset(), i64::MAX);
        assert_eq!(wide.offset(), i64::MAX);
        assert_eq!(last.limit(), 10);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("john"), "%john%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn builders_accumulate_filters() {
        let query = JobListQuery::default()
            .search("sofá")
            .status(JobStatus::InProgress)
            .paginate(2, 20);
        assert_eq!(query.search.as_deref(), Some("sofá"));
        assert_eq!(query.status, Some(JobStatus::InProgress));
        assert_eq!(query.pagination, Some(Pagination { page: 2, per_page: 20 }));
    }
}
