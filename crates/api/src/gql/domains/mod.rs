//! One module per domain area, each holding a schema fragment and the mock
//! table for the types it declares.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use super::error::SchemaError;
use super::merge::Fragment;
use super::mock::MockTable;

/// Fragments in merge order.
pub fn fragments() -> Vec<Fragment> {
    vec![
        auth::FRAGMENT,
        users::FRAGMENT,
        cart::FRAGMENT,
        orders::FRAGMENT,
        products::FRAGMENT,
    ]
}

pub fn mocks() -> Result<MockTable, SchemaError> {
    auth::mocks()?
        .merge(users::mocks()?)?
        .merge(cart::mocks()?)?
        .merge(orders::mocks()?)?
        .merge(products::mocks()?)
}
