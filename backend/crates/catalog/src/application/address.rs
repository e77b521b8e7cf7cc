//! User address listing

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::address::UserAddress;
use crate::domain::repository::AddressRepository;
use crate::error::CatalogResult;

pub struct ListUserAddressesUseCase<A>
where
    A: AddressRepository,
{
    addresses: Arc<A>,
}

impl<A> ListUserAddressesUseCase<A>
where
    A: AddressRepository,
{
    pub fn new(addresses: Arc<A>) -> Self {
        Self { addresses }
    }

    pub async fn execute(&self, user_id: &UserId) -> CatalogResult<Vec<UserAddress>> {
        let mut addresses = self.addresses.list_for_user(user_id).await?;
        // Stable: keeps repository order within each group.
        addresses.sort_by_key(|a| !a.is_primary);
        Ok(addresses)
    }
}
