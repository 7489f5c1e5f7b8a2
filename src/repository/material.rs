//! Repository implementation for stocked materials.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        material::{Material, NewMaterial, UpdateMaterial},
        types::MaterialId,
    },
    models::material::{
        Material as DbMaterial, NewMaterial as DbNewMaterial, UpdateMaterial as DbUpdateMaterial,
    },
    repository::{
        DieselRepository, MaterialListQuery, MaterialReader, MaterialWriter,
        errors::{RepositoryError, RepositoryResult},
        like_pattern,
    },
};

impl MaterialReader for DieselRepository {
    fn get_material_by_id(&self, id: MaterialId) -> RepositoryResult<Option<Material>> {
        use crate::schema::materials;

        let mut conn = self.conn()?;
        let db_material = materials::table
            .find(id.get())
            .first::<DbMaterial>(&mut conn)
            .optional()?;

        Ok(db_material.map(Material::try_from).transpose()?)
    }

    fn list_materials(
        &self,
        query: MaterialListQuery,
    ) -> RepositoryResult<(usize, Vec<Material>)> {
        use crate::schema::materials;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = materials::table.into_boxed::<Sqlite>();

            if let Some(category) = query.category {
                items = items.filter(materials::category.eq(category.as_str()));
            }

            if let Some(active) = query.active {
                items = items.filter(materials::active.eq(active));
            }

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    materials::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(materials::unit.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let materials = items
            .order(materials::category.asc())
            .then_order_by(materials::name.asc())
            .then_order_by(materials::id.asc())
            .load::<DbMaterial>(&mut conn)?
            .into_iter()
            .map(Material::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, materials))
    }
}

impl MaterialWriter for DieselRepository {
    fn create_material(&self, new_material: &NewMaterial) -> RepositoryResult<Material> {
        use crate::schema::materials;

        let mut conn = self.conn()?;
        let insertable: DbNewMaterial = new_material.into();

        let db_material = diesel::insert_into(materials::table)
            .values(&insertable)
            .get_result::<DbMaterial>(&mut conn)?;

        Ok(Material::try_from(db_material)?)
    }

    fn update_material(
        &self,
        id: MaterialId,
        updates: &UpdateMaterial,
    ) -> RepositoryResult<Material> {
        use crate::schema::materials;

        let mut conn = self.conn()?;
        let changeset = DbUpdateMaterial::new(updates, Utc::now().naive_utc());

        let db_material = diesel::update(materials::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbMaterial>(&mut conn)?;

        Ok(Material::try_from(db_material)?)
    }

    fn delete_material(&self, id: MaterialId) -> RepositoryResult<()> {
        use crate::schema::materials;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(materials::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
