use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::job::{JobStatus, NewJob};
use crate::domain::types::{Cents, ClientId, EmployeeId, JobTitle};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /jobs` and `PUT /jobs/{id}`.
pub struct JobForm {
    pub client_id: i32,
    #[serde(default)]
    pub employee_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "El título es obligatorio"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Agreed price in cents.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<JobForm> for NewJob {
    type Error = FormError;

    fn try_from(form: JobForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status = match non_blank(form.status) {
            Some(status) => status
                .parse::<JobStatus>()
                .map_err(|_| FormError::InvalidChoice("status"))?,
            None => JobStatus::default(),
        };

        Ok(NewJob {
            client_id: ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?,
            employee_id: form
                .employee_id
                .map(EmployeeId::new)
                .transpose()
                .map_err(|_| FormError::InvalidEmployeeId)?,
            title: JobTitle::new(form.title).map_err(|_| FormError::InvalidTitle)?,
            description: non_blank(form.description),
            status,
            price: Cents::new(form.price).map_err(|_| FormError::InvalidAmount("price"))?,
            due_date: form.due_date,
        })
    }
}
