mod mocks;

pub use mocks::mocks;

use crate::gql::merge::Fragment;

pub const FRAGMENT: Fragment = Fragment::new("users", include_str!("schema.graphql"));
