//! Client administration workflows.

use crate::PORTAL_ADMIN_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::dto::api::{ClientsQuery, parse_flag};
use crate::forms::client::{ClientForm, ClientPayload};
use crate::pagination::PageEnvelope;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Returns one page of clients matching the search and filters.
pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ClientsQuery,
) -> ServiceResult<PageEnvelope<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let window = params.window();
    let mut query = ClientListQuery::default().paginate(window.page, window.per_page);

    if let Some(term) = window.search {
        query = query.search(term);
    }
    if let Some(active) = parse_flag("active", params.active.as_deref())? {
        query = query.active(active);
    }

    let (total, clients) = repo.list_clients(query)?;

    Ok(PageEnvelope::new(clients, total, window.page, window.per_page))
}

pub fn create_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let payload = ClientPayload::try_from(form)?;

    let client = repo.create_client(&payload.into_new_client())?;
    log::info!("Client {} created by {}", client.id, user.email);

    Ok(client)
}

pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let client_id = ClientId::new(client_id).map_err(|_| ServiceError::NotFound)?;
    let payload = ClientPayload::try_from(form)?;

    Ok(repo.update_client(client_id, &payload.into_update())?)
}

/// Deletes a client that has no jobs attached.
pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, client_id: i32) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let client_id = ClientId::new(client_id).map_err(|_| ServiceError::NotFound)?;

    if repo.count_client_jobs(client_id)? > 0 {
        return Err(ServiceError::Conflict(
            "El cliente tiene trabajos asociados".to_string(),
        ));
    }

    repo.delete_client(client_id)?;
    log::info!("Client {client_id} deleted by {}", user.email);

    Ok(())
}
