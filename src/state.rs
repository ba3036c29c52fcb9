use crate::auth::CredentialVerifier;
use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        data: AppData,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            credentials,
        }
    }

    /// Applies `change` to a copy of the store, persists it, then swaps it in.
    ///
    /// Nothing is committed when `change` or the write fails.
    pub async fn commit<R>(
        &self,
        change: impl FnOnce(&mut AppData) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut data = self.data.lock().await;
        let mut draft = data.clone();
        let outcome = change(&mut draft)?;
        persist_data(&self.data_path, &draft).await?;
        *data = draft;
        Ok(outcome)
    }
}
