use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Cents, MaterialId, MaterialName, MeasureUnit, StockLevel, TypeConstraintError,
};

/// Fabric, foam, wood or hardware kept in the workshop.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: MaterialName,
    pub category: MaterialCategory,
    pub unit: MeasureUnit,
    pub unit_price: Cents,
    pub stock: StockLevel,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Fabric,
    Leather,
    Foam,
    Wood,
    Hardware,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 6] = [
        MaterialCategory::Fabric,
        MaterialCategory::Leather,
        MaterialCategory::Foam,
        MaterialCategory::Wood,
        MaterialCategory::Hardware,
        MaterialCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Fabric => "fabric",
            MaterialCategory::Leather => "leather",
            MaterialCategory::Foam => "foam",
            MaterialCategory::Wood => "wood",
            MaterialCategory::Hardware => "hardware",
            MaterialCategory::Other => "other",
        }
    }
}

impl Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown category `{s}`")))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub name: MaterialName,
    pub category: MaterialCategory,
    pub unit: MeasureUnit,
    pub unit_price: Cents,
    pub stock: StockLevel,
    pub active: bool,
}

pub type UpdateMaterial = NewMaterial;
