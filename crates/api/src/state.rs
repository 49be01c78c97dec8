use std::sync::Arc;

use async_graphql::dynamic::Schema;

use crate::config::Config;
use crate::gql::domains;
use crate::gql::{build_schema, merge_fragments, Fragment, MockTable, SchemaDocument, SchemaError};

/// Everything a request needs, built once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    document: Arc<SchemaDocument>,
    mocks: Arc<MockTable>,
    schema: Schema,
}

impl AppState {
    /// State for the storefront fragments and mocks.
    pub fn new(config: Config) -> Result<Self, SchemaError> {
        Self::from_parts(config, &domains::fragments(), domains::mocks()?)
    }

    /// Merge `fragments`, validate `mocks` against the result and build the
    /// executable schema. Nothing is served unless every step succeeds.
    pub fn from_parts(
        config: Config,
        fragments: &[Fragment],
        mocks: MockTable,
    ) -> Result<Self, SchemaError> {
        let document = Arc::new(merge_fragments(fragments)?);
        mocks.validate(&document)?;
        let mocks = Arc::new(mocks);
        let schema = build_schema(&config, document.clone(), mocks.clone())?;

        tracing::info!(
            fragments = fragments.len(),
            types = document.len(),
            mocks = mocks.len(),
            "schema ready"
        );

        Ok(Self {
            config: Arc::new(config),
            document,
            mocks,
            schema,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn mocks(&self) -> &MockTable {
        &self.mocks
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
