//! Startup failures
//!
//! Everything in here is fatal: the tracker is useless without its spell data,
//! slot art, or a valid slot layout, so these abort before the window opens.

use std::path::PathBuf;
use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to read spell catalog {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse spell catalog {path:?}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing image asset {0:?}")]
    MissingAsset(PathBuf),

    #[error("invalid slot configuration: {0}")]
    InvalidSlots(#[from] LedgerError),
}
