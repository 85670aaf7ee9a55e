use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{AppError, AppResult};

/// Decode JSON text, reporting the path of the first offending field.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> AppResult<T> {
    let mut de = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut de)?;
    de.end()
        .map_err(|err| AppError::bad_request(format!("trailing input: {err}")))?;
    Ok(value)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let text = fs::read_to_string(path)?;
    parse_json(&text).map_err(|err| match err {
        AppError::Json(inner) => AppError::bad_request(format!("{}: {}", path.display(), inner)),
        other => other,
    })
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
