use crate::models::AppData;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write store: {0}")]
    Io(#[from] std::io::Error),
}

/// The store file with each record kept raw, so one bad record cannot sink the rest.
#[derive(Deserialize)]
struct RawStore {
    #[serde(default)]
    events: Vec<Value>,
    #[serde(default)]
    trainings: Vec<Value>,
}

/// Reads the document store. A missing file is an empty store.
///
/// Unreadable content is never silently dropped: a file that is not a store at
/// all is moved aside to `<path>.corrupt` before starting empty, and a file with
/// some bad records is copied there before the readable records are kept.
pub async fn load_data(path: &Path) -> Result<AppData, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(AppData::default()),
        Err(err) => return Err(err.into()),
    };

    let raw = match serde_json::from_slice::<RawStore>(&bytes) {
        Ok(raw) => raw,
        Err(err) => {
            let backup = corrupt_path(path);
            fs::rename(path, &backup).await?;
            error!(
                "failed to parse data file, moved it to {}: {err}",
                backup.display()
            );
            return Ok(AppData::default());
        }
    };

    let (events, bad_events) = parse_records("event", raw.events);
    let (trainings, bad_trainings) = parse_records("training", raw.trainings);
    if bad_events + bad_trainings > 0 {
        let backup = corrupt_path(path);
        fs::copy(path, &backup).await?;
        warn!(
            bad_events,
            bad_trainings,
            "skipped unreadable records, original kept at {}",
            backup.display()
        );
    }

    info!(
        events = events.len(),
        trainings = trainings.len(),
        "loaded store from {}",
        path.display()
    );
    Ok(AppData { events, trainings })
}

fn parse_records<T: DeserializeOwned>(kind: &str, raw: Vec<Value>) -> (Vec<T>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut rejected = 0;
    for value in raw {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(err) => {
                rejected += 1;
                warn!(kind, "skipping unreadable record: {err}");
            }
        }
    }
    (records, rejected)
}

pub fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Rewrites the whole store. The payload lands in a sibling file first and is
/// renamed over the old one, so a failed write leaves the previous copy intact.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, payload).await?;
    fs::rename(&staging, path).await?;
    Ok(())
}
