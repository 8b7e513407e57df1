//! Implementations of the data source port.

pub mod fpl;
mod settings;
pub mod snapshot;

use std::sync::Arc;

use tracing::{debug, info};

pub use fpl::FplClient;
pub use settings::SourceConfig;
pub use snapshot::SnapshotSource;

use crate::error::Result;
use crate::port::DataSource;

/// Build the configured source: the snapshot file when one is set,
/// otherwise the live API.
pub async fn open_source(config: &SourceConfig) -> Result<Arc<dyn DataSource>> {
    let source: Arc<dyn DataSource> = match &config.snapshot_path {
        Some(path) => Arc::new(SnapshotSource::open(path).await?),
        None => {
            let client = FplClient::from_config(config)?;
            debug!(base_url = %client.base_url(), "Using live API");
            Arc::new(client)
        }
    };
    info!(source = source.name(), "Data source ready");
    Ok(source)
}
