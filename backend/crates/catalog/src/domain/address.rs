//! Postal addresses

use kernel::id::{AddressId, StoreId, UserAddressId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub address_line: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    /// Set when the address belongs to a store
    pub store_id: Option<StoreId>,
}

/// An address saved by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAddress {
    pub id: UserAddressId,
    pub address: Address,
    pub is_primary: bool,
}

/// Distinct, non-empty provinces in first-seen order.
pub fn distinct_provinces<'a>(provinces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for province in provinces.into_iter().map(str::trim) {
        if !province.is_empty() && !seen.iter().any(|p| p == province) {
            seen.push(province.to_string());
        }
    }
    seen
}
