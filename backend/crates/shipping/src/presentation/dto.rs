//! Data Transfer Objects

use serde::Deserialize;

use crate::domain::model::CostQuery;
use crate::error::ShippingResult;

#[derive(Debug, Default, Deserialize)]
pub struct CitiesQuery {
    pub province: Option<String>,
}

/// Ids may arrive as JSON strings or numbers; both are sent upstream as strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CostRequest {
    pub origin: Option<IdValue>,
    pub destination: Option<IdValue>,
    pub weight: Option<i64>,
    pub courier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(u64),
}

impl From<IdValue> for String {
    fn from(value: IdValue) -> Self {
        match value {
            IdValue::Text(s) => s,
            IdValue::Number(n) => n.to_string(),
        }
    }
}

impl CostRequest {
    pub fn into_query(self) -> ShippingResult<CostQuery> {
        CostQuery::new(
            self.origin.map(Into::into),
            self.destination.map(Into::into),
            self.weight,
            self.courier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_request_accepts_numeric_ids() {
        let req: CostRequest = serde_json::from_str(
            r#"{"origin":501,"destination":"114","weight":1700,"courier":"pos"}"#,
        )
        .unwrap();
        let query = req.into_query().unwrap();
        assert_eq!(query.origin, "501");
        assert_eq!(query.destination, "114");
    }

    #[test]
    fn test_empty_cost_request_is_rejected() {
        let req: CostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.into_query().is_err());
    }
}
