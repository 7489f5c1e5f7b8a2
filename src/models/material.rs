use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::material::{Material as DomainMaterial, NewMaterial as DomainNewMaterial};
use crate::domain::types::{
    Cents, MaterialId, MaterialName, MeasureUnit, StockLevel, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::materials)]
/// Diesel model for [`crate::domain::material::Material`].
pub struct Material {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub unit_price_cents: i64,
    pub stock: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::materials)]
pub struct NewMaterial<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub unit: &'a str,
    pub unit_price_cents: i64,
    pub stock: i32,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::materials)]
pub struct UpdateMaterial<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub unit: &'a str,
    pub unit_price_cents: i64,
    pub stock: i32,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Material> for DomainMaterial {
    type Error = TypeConstraintError;

    fn try_from(material: Material) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MaterialId::new(material.id)?,
            name: MaterialName::new(material.name)?,
            category: material.category.parse()?,
            unit: MeasureUnit::new(material.unit)?,
            unit_price: Cents::new(material.unit_price_cents)?,
            stock: StockLevel::new(material.stock)?,
            active: material.active,
            created_at: material.created_at,
            updated_at: material.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewMaterial> for NewMaterial<'a> {
    fn from(material: &'a DomainNewMaterial) -> Self {
        Self {
            name: material.name.as_str(),
            category: material.category.as_str(),
            unit: material.unit.as_str(),
            unit_price_cents: material.unit_price.get(),
            stock: material.stock.get(),
            active: material.active,
        }
    }
}

impl<'a> UpdateMaterial<'a> {
    pub fn new(material: &'a DomainNewMaterial, updated_at: NaiveDateTime) -> Self {
        Self {
            name: material.name.as_str(),
            category: material.category.as_str(),
            unit: material.unit.as_str(),
            unit_price_cents: material.unit_price.get(),
            stock: material.stock.get(),
            active: material.active,
            updated_at,
        }
    }
}
