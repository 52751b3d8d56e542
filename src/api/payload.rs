//! Request bodies: object-only extraction and field-located decoding.

use axum::{Json, extract::rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::{ClientPatch, NewClient};

use super::error::{ApiError, ApiResult, FieldError};

/// A JSON object body that decodes into `Self`.
pub trait Payload: DeserializeOwned {
    /// Keys that must be present in the object
    const REQUIRED: &'static [&'static str] = &[];
}

impl Payload for NewClient {
    const REQUIRED: &'static [&'static str] = &["nom", "prenom", "adresse"];
}

impl Payload for ClientPatch {}

/// Decode an extracted body into `T`.
///
/// Every absent required key is reported at once. Anything other than an
/// object has already been rejected by the `Map` extractor.
pub fn from_json<T: Payload>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<T> {
    let Json(object) = payload?;

    let missing: Vec<_> = T::REQUIRED
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| FieldError::body(key, "Field required", "missing"))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::Validation(missing));
    }

    Ok(serde_path_to_error::deserialize(Value::Object(object))?)
}
