use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::employee::{Employee as DomainEmployee, NewEmployee as DomainNewEmployee};
use crate::domain::types::{EmailAddress, EmployeeId, PersonName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEmployee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::new(employee.id)?,
            name: PersonName::new(employee.name)?,
            email: EmailAddress::new(employee.email)?,
            phone: employee.phone.map(PhoneNumber::new).transpose()?,
            role: employee.role.parse()?,
            active: employee.active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            name: employee.name.as_str(),
            email: employee.email.as_str(),
            phone: employee.phone.as_ref().map(PhoneNumber::as_str),
            role: employee.role.as_str(),
            active: employee.active,
        }
    }
}

impl<'a> UpdateEmployee<'a> {
    pub fn new(employee: &'a DomainNewEmployee, updated_at: NaiveDateTime) -> Self {
        Self {
            name: employee.name.as_str(),
            email: employee.email.as_str(),
            phone: employee.phone.as_ref().map(PhoneNumber::as_str),
            role: employee.role.as_str(),
            active: employee.active,
            updated_at,
        }
    }
}
