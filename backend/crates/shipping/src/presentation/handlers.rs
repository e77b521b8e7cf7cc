//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use kernel::response::ApiResponse;

use crate::domain::model::{City, Province, ServiceCost};
use crate::domain::provider::ShippingRates;
use crate::error::{ShippingError, ShippingResult};
use crate::presentation::dto::{CitiesQuery, CostRequest};

pub struct ShippingAppState<P> {
    pub rates: Arc<P>,
}

impl<P> Clone for ShippingAppState<P> {
    fn clone(&self) -> Self {
        Self {
            rates: self.rates.clone(),
        }
    }
}

/// GET /provinces
pub async fn list_provinces<P>(
    State(state): State<ShippingAppState<P>>,
) -> ShippingResult<Json<ApiResponse<Vec<Province>>>>
where
    P: ShippingRates + Send + Sync + 'static,
{
    let provinces = state.rates.provinces().await?;
    Ok(Json(ApiResponse::data(provinces)))
}

/// GET /cities?province=
///
/// Without `province` every city is returned.
pub async fn list_cities<P>(
    State(state): State<ShippingAppState<P>>,
    Query(query): Query<CitiesQuery>,
) -> ShippingResult<Json<ApiResponse<Vec<City>>>>
where
    P: ShippingRates + Send + Sync + 'static,
{
    let province = query
        .province
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let cities = match province {
        Some(province_id) => state.rates.cities_by_province(province_id).await?,
        None => state.rates.all_cities().await?,
    };
    Ok(Json(ApiResponse::data(cities)))
}

/// GET /cities/{city_id}
pub async fn get_city<P>(
    State(state): State<ShippingAppState<P>>,
    Path(city_id): Path<String>,
) -> ShippingResult<Json<ApiResponse<City>>>
where
    P: ShippingRates + Send + Sync + 'static,
{
    let city = state.rates.city_by_id(&city_id).await?;
    Ok(Json(ApiResponse::data(city)))
}

/// POST /cost
pub async fn calculate_cost<P>(
    State(state): State<ShippingAppState<P>>,
    WithRejection(Json(req), _): WithRejection<Json<CostRequest>, ShippingError>,
) -> ShippingResult<Json<ApiResponse<Vec<ServiceCost>>>>
where
    P: ShippingRates + Send + Sync + 'static,
{
    let query = req.into_query()?;
    let costs = state.rates.calculate_cost(&query).await?;
    Ok(Json(ApiResponse::data(costs)))
}
