//! RajaOngkir (starter tier) REST client
//!
//! Every response is wrapped in `{"rajaongkir": {"status": {..}, "results": ..}}`.
//! `results` is an array for list endpoints and a bare object when a single
//! city is requested by id.

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ShippingConfig;
use crate::domain::model::{City, CostQuery, CourierCosts, Province, ServiceCost};
use crate::domain::provider::ShippingRates;
use crate::error::{ShippingError, ShippingResult};

#[derive(Clone)]
pub struct RajaOngkirClient {
    client: reqwest::Client,
    config: ShippingConfig,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    rajaongkir: Body<T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Body<T> {
    status: Status,
    #[serde(default)]
    results: Option<OneOrMany<T>>,
}

#[derive(Deserialize)]
struct Status {
    code: u16,
    description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl RajaOngkirClient {
    pub fn new(config: ShippingConfig) -> ShippingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShippingError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.config.endpoint(path))
            .header("key", self.config.api_key.expose_secret())
    }

    /// Sends the request and unwraps the envelope. A provider-side error is
    /// reported through `status` even when the HTTP status is 4xx, so the
    /// body is parsed before the status line is considered.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ShippingResult<Vec<T>> {
        let response = request.send().await?;
        let http_status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if http_status.is_success() => {
                return Err(ShippingError::Upstream(format!("unexpected payload: {e}")));
            }
            Err(_) => {
                return Err(ShippingError::Upstream(format!("HTTP {http_status}")));
            }
        };

        let body = envelope.rajaongkir;
        if body.status.code != 200 || !http_status.is_success() {
            return Err(ShippingError::Upstream(format!(
                "{} {}",
                body.status.code, body.status.description
            )));
        }

        let results = body.results.map(OneOrMany::into_vec).unwrap_or_default();
        if results.is_empty() {
            return Err(ShippingError::EmptyResults);
        }
        Ok(results)
    }
}

impl ShippingRates for RajaOngkirClient {
    async fn provinces(&self) -> ShippingResult<Vec<Province>> {
        self.fetch(self.get("province")).await
    }

    async fn all_cities(&self) -> ShippingResult<Vec<City>> {
        self.fetch(self.get("city")).await
    }

    async fn cities_by_province(&self, province_id: &str) -> ShippingResult<Vec<City>> {
        self.fetch(self.get("city").query(&[("province", province_id)]))
            .await
    }

    async fn city_by_id(&self, city_id: &str) -> ShippingResult<City> {
        let cities: Vec<City> = self.fetch(self.get("city").query(&[("id", city_id)])).await?;
        cities.into_iter().next().ok_or(ShippingError::EmptyResults)
    }

    async fn calculate_cost(&self, query: &CostQuery) -> ShippingResult<Vec<ServiceCost>> {
        let request = self
            .client
            .post(self.config.endpoint("cost"))
            .header("key", self.config.api_key.expose_secret())
            .json(query);

        let couriers: Vec<CourierCosts> = self.fetch(request).await?;
        let first = couriers
            .into_iter()
            .next()
            .ok_or(ShippingError::EmptyResults)?;

        tracing::debug!(
            courier = %first.code,
            services = first.costs.len(),
            "Shipping cost calculated"
        );
        Ok(first.costs)
    }
}
