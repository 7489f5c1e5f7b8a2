//! Repository implementation for workshop employees.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        employee::{Employee, NewEmployee, UpdateEmployee},
        types::EmployeeId,
    },
    models::employee::{
        Employee as DbEmployee, NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
    },
    repository::{
        DieselRepository, EmployeeListQuery, EmployeeReader, EmployeeWriter,
        errors::{RepositoryError, RepositoryResult},
        like_pattern,
    },
};

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let db_employee = employees::table
            .find(id.get())
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        Ok(db_employee.map(Employee::try_from).transpose()?)
    }

    fn list_employees(
        &self,
        query: EmployeeListQuery,
    ) -> RepositoryResult<(usize, Vec<Employee>)> {
        use crate::schema::employees;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = employees::table.into_boxed::<Sqlite>();

            if let Some(role) = query.role {
                items = items.filter(employees::role.eq(role.as_str()));
            }

            if let Some(active) = query.active {
                items = items.filter(employees::active.eq(active));
            }

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    employees::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(employees::email.like(pattern.clone()).escape('\\'))
                        .or(employees::phone.assume_not_null().like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let employees = items
            .order(employees::name.asc())
            .then_order_by(employees::id.asc())
            .load::<DbEmployee>(&mut conn)?
            .into_iter()
            .map(Employee::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, employees))
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let insertable: DbNewEmployee = new_employee.into();

        let db_employee = diesel::insert_into(employees::table)
            .values(&insertable)
            .get_result::<DbEmployee>(&mut conn)?;

        Ok(Employee::try_from(db_employee)?)
    }

    fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let changeset = DbUpdateEmployee::new(updates, Utc::now().naive_utc());

        let db_employee = diesel::update(employees::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbEmployee>(&mut conn)?;

        Ok(Employee::try_from(db_employee)?)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()> {
        use crate::schema::{employees, jobs};

        let mut conn = self.conn()?;

        let deleted = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::update(jobs::table.filter(jobs::employee_id.eq(id.get())))
                .set(jobs::employee_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(employees::table.find(id.get())).execute(conn)
        })?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
