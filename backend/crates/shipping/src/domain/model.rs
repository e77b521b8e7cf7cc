//! Shipping models
//!
//! Field names follow the provider on the way in and the API's camelCase on
//! the way out.

use kernel::error::app_error::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::error::{ShippingError, ShippingResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Province {
    pub province_id: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct City {
    pub city_id: String,
    pub province_id: String,
    pub province: String,
    /// "Kota" or "Kabupaten"
    #[serde(rename = "type")]
    pub kind: String,
    pub city_name: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostValue {
    /// Rupiah
    pub value: i64,
    /// Estimated days, e.g. "2-3"
    pub etd: String,
    #[serde(default)]
    pub note: String,
}

/// One courier service with its price options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: String,
    pub description: String,
    pub cost: Vec<CostValue>,
}

/// Courier quote as returned by the provider; only `costs` is exposed.
#[derive(Debug, Clone, Deserialize)]
pub struct CourierCosts {
    pub code: String,
    pub name: String,
    pub costs: Vec<ServiceCost>,
}

/// Validated cost lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostQuery {
    pub origin: String,
    pub destination: String,
    /// Grams
    pub weight: u32,
    pub courier: String,
}

impl CostQuery {
    pub fn new(
        origin: Option<String>,
        destination: Option<String>,
        weight: Option<i64>,
        courier: Option<String>,
    ) -> ShippingResult<Self> {
        let mut errors = FieldErrors::new();
        let mut required = |field: &str, value: Option<String>| {
            let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if value.is_none() {
                errors
                    .entry(field.to_string())
                    .or_default()
                    .push(format!("{field} is required"));
            }
            value
        };

        let origin = required("origin", origin);
        let destination = required("destination", destination);
        let courier = required("courier", courier).map(|c| c.to_lowercase());

        let weight = weight.and_then(|w| u32::try_from(w).ok()).filter(|w| *w > 0);
        if weight.is_none() {
            errors
                .entry("weight".to_string())
                .or_default()
                .push("weight must be a positive number of grams".to_string());
        }

        match (origin, destination, weight, courier) {
            (Some(origin), Some(destination), Some(weight), Some(courier)) => Ok(Self {
                origin,
                destination,
                weight,
                courier,
            }),
            _ => Err(ShippingError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_wire_names() {
        let city: City = serde_json::from_str(
            r#"{"city_id":"23","province_id":"9","province":"Jawa Barat","type":"Kota","city_name":"Bandung","postal_code":"40111"}"#,
        )
        .unwrap();
        assert_eq!(city.kind, "Kota");

        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(json["cityName"], "Bandung");
        assert_eq!(json["type"], "Kota");
    }

    #[test]
    fn test_cost_query_validation() {
        let ok = CostQuery::new(
            Some("501".into()),
            Some("114".into()),
            Some(1700),
            Some("JNE".into()),
        )
        .unwrap();
        assert_eq!(ok.courier, "jne");

        let err = CostQuery::new(Some("501".into()), None, Some(0), Some(" ".into())).unwrap_err();
        let ShippingError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("destination"));
        assert!(fields.contains_key("weight"));
        assert!(fields.contains_key("courier"));
        assert!(!fields.contains_key("origin"));
    }
}
