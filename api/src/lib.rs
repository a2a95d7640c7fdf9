//! This crate contains all shared fullstack server functions and the turnout
//! data model that crosses the server/client boundary.

pub mod records;

#[cfg(not(target_arch = "wasm32"))]
pub mod loader;

pub use records::{DataError, Gender, TurnoutDataset, TurnoutRecord, Year};

use dioxus::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
static DATASET: once_cell::sync::OnceCell<TurnoutDataset> = once_cell::sync::OnceCell::new();

/// Loads and caches the dataset for this process.
///
/// The server binary calls this before it starts serving so a broken
/// spreadsheet aborts startup instead of surfacing per request. Later calls
/// (the server function below) get the cached copy.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_startup_dataset() -> Result<&'static TurnoutDataset, loader::LoadError> {
    DATASET.get_or_try_init(|| loader::load_dataset(&loader::data_path()))
}

/// Ships the validated turnout dataset to the client.
#[server]
pub async fn fetch_dataset() -> Result<TurnoutDataset, ServerFnError> {
    let dataset = load_startup_dataset().map_err(|err| ServerFnError::new(err.to_string()))?;
    Ok(dataset.clone())
}
