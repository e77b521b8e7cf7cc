//! Rate provider port

use crate::domain::model::{City, CostQuery, Province, ServiceCost};
use crate::error::ShippingResult;

#[trait_variant::make(ShippingRates: Send)]
pub trait LocalShippingRates {
    async fn provinces(&self) -> ShippingResult<Vec<Province>>;

    async fn all_cities(&self) -> ShippingResult<Vec<City>>;

    async fn cities_by_province(&self, province_id: &str) -> ShippingResult<Vec<City>>;

    async fn city_by_id(&self, city_id: &str) -> ShippingResult<City>;

    /// Service options of the first courier in the quote.
    async fn calculate_cost(&self, query: &CostQuery) -> ShippingResult<Vec<ServiceCost>>;
}
