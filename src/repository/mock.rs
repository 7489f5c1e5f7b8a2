//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::job::{Job, NewJob, UpdateJob};
use crate::domain::material::{Material, NewMaterial, UpdateMaterial};
use crate::domain::quote::{NewQuote, Quote, QuoteReview};
use crate::domain::types::{ClientId, EmployeeId, JobId, MaterialId, PublicId, QuoteId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, EmployeeListQuery, EmployeeReader,
    EmployeeWriter, JobListQuery, JobReader, JobWriter, MaterialListQuery, MaterialReader,
    MaterialWriter, QuoteListQuery, QuoteReader, QuoteWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
        fn count_client_jobs(&self, id: ClientId) -> RepositoryResult<usize>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    }

    impl EmployeeReader for Repository {
        fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>>;
        fn list_employees(
            &self,
            query: EmployeeListQuery,
        ) -> RepositoryResult<(usize, Vec<Employee>)>;
    }

    impl EmployeeWriter for Repository {
        fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
        fn update_employee(
            &self,
            id: EmployeeId,
            updates: &UpdateEmployee,
        ) -> RepositoryResult<Employee>;
        fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
    }

    impl MaterialReader for Repository {
        fn get_material_by_id(&self, id: MaterialId) -> RepositoryResult<Option<Material>>;
        fn list_materials(
            &self,
            query: MaterialListQuery,
        ) -> RepositoryResult<(usize, Vec<Material>)>;
    }

    impl MaterialWriter for Repository {
        fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material>;
        fn update_material(
            &self,
            id: MaterialId,
            updates: &UpdateMaterial,
        ) -> RepositoryResult<Material>;
        fn delete_material(&self, id: MaterialId) -> RepositoryResult<()>;
    }

    impl QuoteReader for Repository {
        fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>>;
        fn get_quote_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Quote>>;
        fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<Quote>)>;
    }

    impl QuoteWriter for Repository {
        fn create_quote(&self, new_quote: &NewQuote) -> RepositoryResult<Quote>;
        fn review_quote(&self, id: QuoteId, review: &QuoteReview) -> RepositoryResult<Quote>;
        fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()>;
    }

    impl JobReader for Repository {
        fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>>;
        fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
        fn update_job(&self, id: JobId, updates: &UpdateJob) -> RepositoryResult<Job>;
        fn delete_job(&self, id: JobId) -> RepositoryResult<()>;
    }
}
