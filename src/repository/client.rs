//! Repository implementation for workshop clients.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{
        ClientListQuery, ClientReader, ClientWriter, DieselRepository, errors::RepositoryError,
        errors::RepositoryResult, like_pattern,
    },
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(db_client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = clients::table.into_boxed::<Sqlite>();

            if let Some(active) = query.active {
                items = items.filter(clients::active.eq(active));
            }

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    clients::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(clients::email.assume_not_null().like(pattern.clone()).escape('\\'))
                        .or(clients::phone.assume_not_null().like(pattern.clone()).escape('\\'))
                        .or(clients::address.assume_not_null().like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let clients = items
            .order(clients::name.asc())
            .then_order_by(clients::id.asc())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, clients))
    }

    fn count_client_jobs(&self, id: ClientId) -> RepositoryResult<usize> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let total = jobs::table
            .filter(jobs::client_id.eq(id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable: DbNewClient = new_client.into();

        let db_client = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(db_client)?)
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changeset = DbUpdateClient::new(updates, Utc::now().naive_utc());

        let db_client = diesel::update(clients::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(db_client)?)
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
