//! Router-level tests against an in-memory catalog.

use std::sync::{Arc, Mutex};

use auth::AuthConfig;
use auth::application::token::{SessionClaims, TokenService};
use auth::domain::value_object::auth_provider::AuthProvider;
use auth::middleware::AuthGate;
use auth::UserRole;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use kernel::id::{
    AddressId, CategoryId, ProductId, StoreId, StoreProductId, UserAddressId, UserId,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::domain::address::{Address, UserAddress};
use crate::domain::product::{Category, NewProduct, Product, StoreProduct, StoreStock};
use crate::domain::repository::{AddressRepository, ProductRepository, StoreRepository};
use crate::domain::store::{InventoryItem, Store, StoreDetail, StoreSummary};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::router::catalog_router_generic;

// ============================================================================
// Fake
// ============================================================================

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    stores: Vec<Store>,
    user_addresses: Vec<(UserId, UserAddress)>,
    writes: usize,
}

#[derive(Clone, Default)]
struct MemoryCatalog {
    tables: Arc<Mutex<Tables>>,
    fail_store_link: bool,
}

impl MemoryCatalog {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        f(&mut self.tables.lock().unwrap())
    }
}

impl ProductRepository for MemoryCatalog {
    async fn list(&self, search: Option<&str>) -> CatalogResult<Vec<Product>> {
        let needle = search.map(str::to_lowercase);
        Ok(self.with(|t| {
            t.products
                .iter()
                .filter(|p| match &needle {
                    Some(n) => p.name.to_lowercase().contains(n),
                    None => true,
                })
                .cloned()
                .collect()
        }))
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.with(|t| t.products.iter().find(|p| &p.id == id).cloned()))
    }

    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.with(|t| t.products.iter().any(|p| p.name == name)))
    }

    async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
        self.with(|t| -> CatalogResult<Product> {
            let categories = product
                .category_ids
                .iter()
                .map(|id| t.categories.iter().find(|c| &c.id == id).cloned())
                .collect::<Option<Vec<_>>>()
                .ok_or(CatalogError::UnknownCategory)?;

            let created = Product {
                id: product.id,
                name: product.name.clone(),
                description: product.description.clone(),
                price: product.price,
                weight: product.weight,
                created_by: Some(product.created_by),
                categories,
                stock: vec![],
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            t.products.push(created.clone());
            t.writes += 1;
            Ok(created)
        })
    }

    async fn link_to_store(
        &self,
        product_id: &ProductId,
        store_id: &StoreId,
        stock: i32,
    ) -> CatalogResult<StoreProduct> {
        if self.fail_store_link {
            return Err(CatalogError::StoreLinkFailed(sqlx::Error::PoolTimedOut));
        }
        self.with(|t| -> CatalogResult<StoreProduct> {
            let store_name = t
                .stores
                .iter()
                .find(|s| &s.id == store_id)
                .map(|s| s.name.clone())
                .ok_or(CatalogError::StoreLinkFailed(sqlx::Error::RowNotFound))?;
            let product = t
                .products
                .iter_mut()
                .find(|p| &p.id == product_id)
                .ok_or(CatalogError::StoreLinkFailed(sqlx::Error::RowNotFound))?;
            product.stock.push(StoreStock {
                store_id: *store_id,
                store_name,
                stock,
            });
            t.writes += 1;
            Ok(StoreProduct {
                id: StoreProductId::new(),
                product_id: *product_id,
                store_id: *store_id,
                stock,
            })
        })
    }
}

impl StoreRepository for MemoryCatalog {
    async fn list(&self) -> CatalogResult<Vec<Store>> {
        Ok(self.with(|t| t.stores.clone()))
    }

    async fn list_summaries(&self) -> CatalogResult<Vec<StoreSummary>> {
        Ok(self.with(|t| {
            t.stores
                .iter()
                .map(|s| StoreSummary {
                    id: s.id,
                    name: s.name.clone(),
                })
                .collect()
        }))
    }

    async fn find_by_id(&self, id: &StoreId) -> CatalogResult<Option<StoreDetail>> {
        Ok(self.with(|t| -> Option<StoreDetail> {
            let store = t.stores.iter().find(|s| &s.id == id)?.clone();
            let inventory = t
                .products
                .iter()
                .flat_map(|p| {
                    p.stock
                        .iter()
                        .filter(|s| &s.store_id == id)
                        .map(|s| InventoryItem {
                            product_id: p.id,
                            product_name: p.name.clone(),
                            stock: s.stock,
                        })
                })
                .collect();
            Some(StoreDetail { store, inventory })
        }))
    }

    async fn store_provinces(&self) -> CatalogResult<Vec<String>> {
        Ok(self.with(|t| {
            t.stores
                .iter()
                .flat_map(|s| s.addresses.iter().map(|a| a.province.clone()))
                .collect()
        }))
    }
}

impl AddressRepository for MemoryCatalog {
    async fn list_for_user(&self, user_id: &UserId) -> CatalogResult<Vec<UserAddress>> {
        Ok(self.with(|t| {
            t.user_addresses
                .iter()
                .filter(|(owner, _)| owner == user_id)
                .map(|(_, a)| a.clone())
                .collect()
        }))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn address(city: &str, province: &str, store_id: Option<StoreId>) -> Address {
    Address {
        id: AddressId::new(),
        address_line: format!("Jl. Merdeka 1, {city}"),
        city: city.into(),
        province: province.into(),
        postal_code: Some("40111".into()),
        store_id,
    }
}

fn store(name: &str, province: &str) -> Store {
    let id = StoreId::new();
    Store {
        id,
        name: name.into(),
        addresses: vec![address(name, province, Some(id))],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn product(name: &str, stock: &[(&Store, i32)], category: &Category) -> Product {
    Product {
        id: ProductId::new(),
        name: name.into(),
        description: format!("{name} pilihan"),
        price: Decimal::new(25000, 0),
        weight: 500,
        created_by: None,
        categories: vec![category.clone()],
        stock: stock
            .iter()
            .map(|(s, n)| StoreStock {
                store_id: s.id,
                store_name: s.name.clone(),
                stock: *n,
            })
            .collect(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct Fixture {
    app: Router,
    catalog: MemoryCatalog,
    tokens: TokenService,
    category: Category,
    bandung: Store,
    jakarta: Store,
    kopi: Product,
}

impl Fixture {
    fn new() -> Self {
        Self::build(MemoryCatalog::default())
    }

    fn build(catalog: MemoryCatalog) -> Self {
        let config = AuthConfig::development();
        let category = Category {
            id: CategoryId::new(),
            name: "Minuman".into(),
        };
        let bandung = store("Bandung", "Jawa Barat");
        let jakarta = store("Jakarta", "DKI Jakarta");
        let kopi = product("Kopi Gayo", &[(&bandung, 3), (&jakarta, 4)], &category);
        let teh = product("Teh Melati", &[(&jakarta, 10)], &category);

        catalog.with(|t| {
            t.categories.push(category.clone());
            t.stores.push(bandung.clone());
            t.stores.push(jakarta.clone());
            t.products.push(kopi.clone());
            t.products.push(teh);
        });

        let app = catalog_router_generic(catalog.clone(), AuthGate::new(&config));
        Self {
            app,
            catalog,
            tokens: TokenService::new(&config),
            category,
            bandung,
            jakarta,
            kopi,
        }
    }

    fn token(&self, user_id: UserId, role: UserRole) -> String {
        let iat = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            first_name: "Ayu".into(),
            last_name: "Lestari".into(),
            full_name: "Ayu Lestari".into(),
            username: Some("ayu".into()),
            email: "ayu@example.com".into(),
            role,
            provider: AuthProvider::Local,
            is_verified: true,
            iat,
            exp: iat + 3600,
        };
        self.tokens.encode_session(&claims).unwrap()
    }

    fn session(&self, role: UserRole) -> String {
        format!("accessToken={}", self.token(UserId::new(), role))
    }

    async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn create(&self, cookie: Option<String>, body: Value) -> Response<Body> {
        let mut req = Request::post("/products").header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }

    fn valid_body(&self, name: &str) -> Value {
        json!({
            "name": name,
            "description": "Gula aren cair",
            "price": "32000.00",
            "weight": 350,
            "stock": 12,
            "categoryIds": [self.category.id.to_string()],
            "storeId": self.bandung.id.to_string(),
        })
    }

    fn writes(&self) -> usize {
        self.catalog.with(|t| t.writes)
    }
}

async fn body_json(resp: Response<Body>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_listing_total_stock_matches_store_rows() {
    let f = Fixture::new();

    let resp = f.get("/products").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    for item in items {
        let per_store: i64 = item["stockPerStore"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["stock"].as_i64().unwrap())
            .sum();
        assert_eq!(item["totalStock"].as_i64().unwrap(), per_store);
    }
    let kopi = items.iter().find(|i| i["name"] == "Kopi Gayo").unwrap();
    assert_eq!(kopi["totalStock"], 7);
    assert_eq!(kopi["category"], json!(["Minuman"]));
}

#[tokio::test]
async fn test_listing_search_is_case_insensitive() {
    let f = Fixture::new();

    let body = body_json(f.get("/products?search=KOPI").await).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Kopi Gayo");

    let blank = body_json(f.get("/products?search=%20").await).await;
    assert_eq!(blank["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_product() {
    let f = Fixture::new();

    let resp = f.get(&format!("/products/{}", f.kopi.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["categories"][0]["name"], "Minuman");
    assert_eq!(body["data"]["totalStock"], 7);

    let malformed = f.get("/products/not-a-uuid").await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let missing = f.get(&format!("/products/{}", ProductId::new())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await["message"], "Product not found");
}

#[tokio::test]
async fn test_create_product_requires_super_admin_session() {
    let f = Fixture::new();

    let anonymous = f.create(None, f.valid_body("Gula Aren")).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let user = f
        .create(Some(f.session(UserRole::User)), f.valid_body("Gula Aren"))
        .await;
    assert_eq!(user.status(), StatusCode::FORBIDDEN);

    let store_admin = f
        .create(Some(f.session(UserRole::StoreAdmin)), f.valid_body("Gula Aren"))
        .await;
    assert_eq!(store_admin.status(), StatusCode::FORBIDDEN);

    assert_eq!(f.writes(), 0);
}

#[tokio::test]
async fn test_create_product_validation_never_writes() {
    let f = Fixture::new();
    let admin = f.session(UserRole::SuperAdmin);

    let mut no_name = f.valid_body("x");
    no_name["name"] = json!("");
    let resp = f.create(Some(admin.clone()), no_name).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Product name is required.");

    for field in ["description", "price", "weight", "stock", "storeId"] {
        let mut body = f.valid_body("Gula Aren");
        body.as_object_mut().unwrap().remove(field);
        let resp = f.create(Some(admin.clone()), body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(
            body_json(resp).await["message"],
            "Missing required fields or no categories selected."
        );
    }

    let mut no_categories = f.valid_body("Gula Aren");
    no_categories["categoryIds"] = json!([]);
    let resp = f.create(Some(admin.clone()), no_categories).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut negative_stock = f.valid_body("Gula Aren");
    negative_stock["stock"] = json!(-1);
    let resp = f.create(Some(admin), negative_stock).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(f.writes(), 0);
}

#[tokio::test]
async fn test_create_product_wrong_field_types_are_bad_request() {
    let f = Fixture::new();
    let admin = f.session(UserRole::SuperAdmin);

    for (field, value) in [("stock", json!("5")), ("weight", json!("abc"))] {
        let mut body = f.valid_body("Gula Aren");
        body[field] = value;

        let resp = f.create(Some(admin.clone()), body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/json",
            "field {field}"
        );

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Invalid request body.");
        assert!(json["errors"][field].is_array(), "field {field}");
    }

    let resp = f
        .send(
            Request::post("/products")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, admin)
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["errors"]["body"].is_array());

    assert_eq!(f.writes(), 0);
}

#[tokio::test]
async fn test_create_product_links_store() {
    let f = Fixture::new();
    let admin_id = UserId::new();
    let cookie = format!("accessToken={}", f.token(admin_id, UserRole::SuperAdmin));

    let resp = f.create(Some(cookie.clone()), f.valid_body("Gula Aren")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(
        body["message"],
        "Product created successfully and linked to the store"
    );
    assert_eq!(body["data"]["product"]["name"], "Gula Aren");
    assert_eq!(body["data"]["product"]["createdBy"], admin_id.to_string());
    assert_eq!(body["data"]["storeProduct"]["stock"], 12);
    assert_eq!(
        body["data"]["storeProduct"]["storeId"],
        f.bandung.id.to_string()
    );

    let listed = body_json(f.get("/products?search=gula").await).await;
    assert_eq!(listed["data"][0]["totalStock"], 12);

    let duplicate = f.create(Some(cookie), f.valid_body("Gula Aren")).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(duplicate).await["message"],
        "Product name must be unique."
    );
}

#[tokio::test]
async fn test_failed_store_link_keeps_product() {
    let f = Fixture::build(MemoryCatalog {
        fail_store_link: true,
        ..MemoryCatalog::default()
    });

    let resp = f
        .create(Some(f.session(UserRole::SuperAdmin)), f.valid_body("Gula Aren"))
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["message"],
        "Failed to link product to store."
    );

    assert!(f.catalog.with(|t| t.products.iter().any(|p| p.name == "Gula Aren")));
}

// ============================================================================
// Stores & Addresses
// ============================================================================

#[tokio::test]
async fn test_stores() {
    let f = Fixture::new();

    let body = body_json(f.get("/stores").await).await;
    assert_eq!(body["message"], "Stores fetched.");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["addresses"][0]["city"], "Bandung");

    let resp = f.get(&format!("/stores/{}", f.jakarta.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], format!("Get {} success", f.jakarta.id));
    assert_eq!(body["data"]["name"], "Jakarta");
    assert_eq!(body["data"]["inventory"].as_array().unwrap().len(), 2);

    assert_eq!(f.get("/stores/xyz").await.status(), StatusCode::BAD_REQUEST);
    let missing = f.get(&format!("/stores/{}", StoreId::new())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await["message"], "Store not found.");
}

#[tokio::test]
async fn test_admin_store_listing() {
    let f = Fixture::new();

    assert_eq!(f.get("/stores/admin").await.status(), StatusCode::UNAUTHORIZED);

    let resp = f
        .send(
            Request::get("/stores/admin")
                .header(header::COOKIE, f.session(UserRole::SuperAdmin))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"][1]["name"], "Jakarta");
    assert!(body["data"][0].get("addresses").is_none());
}

#[tokio::test]
async fn test_user_addresses_require_bearer_and_put_primary_first() {
    let f = Fixture::new();
    let owner = UserId::new();
    let secondary = UserAddress {
        id: UserAddressId::new(),
        address: address("Bogor", "Jawa Barat", None),
        is_primary: false,
    };
    let primary = UserAddress {
        id: UserAddressId::new(),
        address: address("Depok", "Jawa Barat", None),
        is_primary: true,
    };
    f.catalog.with(|t| {
        t.user_addresses.push((owner, secondary));
        t.user_addresses.push((owner, primary));
        t.user_addresses.push((
            UserId::new(),
            UserAddress {
                id: UserAddressId::new(),
                address: address("Medan", "Sumatera Utara", None),
                is_primary: true,
            },
        ));
    });

    assert_eq!(f.get("/addresses").await.status(), StatusCode::UNAUTHORIZED);

    let resp = f
        .send(
            Request::get("/addresses")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", f.token(owner, UserRole::User)),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["isPrimary"], true);
    assert_eq!(data[0]["address"]["city"], "Depok");
}

#[tokio::test]
async fn test_store_provinces_are_distinct() {
    let f = Fixture::new();
    f.catalog.with(|t| t.stores.push(store("Cimahi", "Jawa Barat")));

    let body = body_json(f.get("/addresses/provinces").await).await;
    assert_eq!(body["data"], json!(["Jawa Barat", "DKI Jakarta"]));
}
