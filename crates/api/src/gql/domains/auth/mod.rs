mod mocks;

pub use mocks::{mocks, MOCK_TOKEN};

use crate::gql::merge::Fragment;

pub const FRAGMENT: Fragment = Fragment::new("auth", include_str!("schema.graphql"));
