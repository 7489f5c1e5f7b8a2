use serde::Deserialize;
use validator::Validate;

use crate::domain::material::{MaterialCategory, NewMaterial};
use crate::domain::types::{Cents, MaterialName, MeasureUnit, StockLevel};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /materials` and `PUT /materials/{id}`.
pub struct MaterialForm {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub name: String,
    pub category: String,
    #[validate(length(min = 1, max = 20, message = "La unidad es obligatoria"))]
    pub unit: String,
    /// Price per unit in cents.
    pub unit_price: i64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub struct MaterialPayload {
    pub name: MaterialName,
    pub category: MaterialCategory,
    pub unit: MeasureUnit,
    pub unit_price: Cents,
    pub stock: StockLevel,
    pub active: bool,
}

impl TryFrom<MaterialForm> for MaterialPayload {
    type Error = FormError;

    fn try_from(form: MaterialForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: MaterialName::new(form.name).map_err(|_| FormError::InvalidName)?,
            category: form
                .category
                .parse()
                .map_err(|_| FormError::InvalidChoice("category"))?,
            unit: MeasureUnit::new(form.unit).map_err(|_| FormError::InvalidUnit)?,
            unit_price: Cents::new(form.unit_price)
                .map_err(|_| FormError::InvalidAmount("unitPrice"))?,
            stock: StockLevel::new(form.stock).map_err(|_| FormError::InvalidStock)?,
            active: form.active,
        })
    }
}

impl From<MaterialPayload> for NewMaterial {
    fn from(payload: MaterialPayload) -> Self {
        NewMaterial {
            name: payload.name,
            category: payload.category,
            unit: payload.unit,
            unit_price: payload.unit_price,
            stock: payload.stock,
            active: payload.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let form = MaterialForm {
            name: "Terciopelo azul".into(),
            category: "fabric".into(),
            unit: "m".into(),
            unit_price: -1,
            stock: 3,
            active: true,
        };

        let err = MaterialPayload::try_from(form).err().unwrap();
        assert!(err.field_errors().contains_key("unitPrice"));
    }

    #[test]
    fn json_body_uses_camel_case() {
        let form: MaterialForm = serde_json::from_value(serde_json::json!({
            "name": "Espuma HR 30",
            "category": "foam",
            "unit": "m2",
            "unitPrice": 2450
        }))
        .unwrap();

        let payload = MaterialPayload::try_from(form).unwrap();
        assert_eq!(payload.category, MaterialCategory::Foam);
        assert_eq!(payload.unit_price.get(), 2450);
        assert_eq!(payload.stock.get(), 0);
        assert!(payload.active);
    }
}
