//! Material catalogue workflows.
//!
//! The material list is served as a bare array, paginated by the caller.

use crate::PORTAL_ADMIN_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::material::{Material, MaterialCategory, NewMaterial};
use crate::domain::types::MaterialId;
use crate::dto::api::{MaterialsQuery, parse_filter, parse_flag};
use crate::forms::material::{MaterialForm, MaterialPayload};
use crate::repository::{MaterialListQuery, MaterialReader, MaterialWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Returns every material matching the search and filters.
pub fn list_materials<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: MaterialsQuery,
) -> ServiceResult<Vec<Material>>
where
    R: MaterialReader + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let mut query = MaterialListQuery::default();

    if let Some(term) = params.window().search {
        query = query.search(term);
    }
    if let Some(category) =
        parse_filter::<MaterialCategory>("category", params.category.as_deref())?
    {
        query = query.category(category);
    }
    if let Some(active) = parse_flag("active", params.active.as_deref())? {
        query = query.active(active);
    }

    let (_total, materials) = repo.list_materials(query)?;

    Ok(materials)
}

pub fn create_material<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: MaterialForm,
) -> ServiceResult<Material>
where
    R: MaterialWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let new_material: NewMaterial = MaterialPayload::try_from(form)?.into();

    Ok(repo.create_material(&new_material)?)
}

pub fn update_material<R>(
    repo: &R,
    user: &AuthenticatedUser,
    material_id: i32,
    form: MaterialForm,
) -> ServiceResult<Material>
where
    R: MaterialWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let material_id = MaterialId::new(material_id).map_err(|_| ServiceError::NotFound)?;
    let updates: NewMaterial = MaterialPayload::try_from(form)?.into();

    Ok(repo.update_material(material_id, &updates)?)
}

pub fn delete_material<R>(repo: &R, user: &AuthenticatedUser, material_id: i32) -> ServiceResult<()>
where
    R: MaterialWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let material_id = MaterialId::new(material_id).map_err(|_| ServiceError::NotFound)?;
    repo.delete_material(material_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::admin_user;

    #[test]
    fn list_is_not_paginated_server_side() {
        let mut repo = MockRepository::new();
        repo.expect_list_materials()
            .withf(|query| {
                query.pagination.is_none()
                    && query.category == Some(MaterialCategory::Leather)
                    && query.search.as_deref() == Some("piel")
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let params = MaterialsQuery {
            page: Some(4),
            limit: Some(5),
            search_term: Some("piel".into()),
            category: Some("leather".into()),
            active: None,
        };

        let materials = list_materials(&repo, &admin_user(), params).expect("should list");
        assert!(materials.is_empty());
    }

    #[test]
    fn zero_id_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_material().times(0);

        let result = delete_material(&repo, &admin_user(), 0);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
