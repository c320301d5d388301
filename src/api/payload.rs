//! Wire shapes of the tracking API
//!
//! Every field is optional so that a payload missing part of its structure still
//! deserializes; absence is then reported as a classified lookup error or handled
//! as an empty field by the normalizer.

use serde::Deserialize;

use crate::types::LookupError;

/// Successful tracking response
///
/// `{ trackResponse: { shipment: [ { package: [ ... ] } ] } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub track_response: Option<TrackResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackResponse {
    pub shipment: Option<Vec<Shipment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Shipment {
    pub package: Option<Vec<PackageEntry>>,
}

/// One package of a shipment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    pub current_status: Option<CurrentStatus>,
    pub delivery_date: Option<Vec<DeliveryDate>>,
    pub delivery_time: Option<DeliveryTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentStatus {
    pub description: Option<String>,
}

/// A dated event of a package; `kind` distinguishes delivery from other dates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryDate {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTime {
    pub end_time: Option<String>,
}

impl TrackingResponse {
    /// Take the first package of the first shipment
    pub fn into_first_package(self) -> Result<PackageEntry, LookupError> {
        let track_response = self
            .track_response
            .ok_or_else(|| LookupError::malformed("missing trackResponse"))?;

        let shipment = track_response
            .shipment
            .and_then(|shipments| shipments.into_iter().next())
            .ok_or_else(|| LookupError::malformed("no shipment in trackResponse"))?;

        shipment
            .package
            .and_then(|packages| packages.into_iter().next())
            .ok_or_else(|| LookupError::malformed("no package in shipment"))
    }
}

impl PackageEntry {
    /// `currentStatus.description`, if present
    pub fn status_description(&self) -> Option<&str> {
        self.current_status
            .as_ref()
            .and_then(|status| status.description.as_deref())
    }

    /// Date of the first `deliveryDate` entry with the given type, if non-empty
    pub fn delivery_date_of_type(&self, kind: &str) -> Option<&str> {
        self.delivery_date
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|entry| entry.kind.as_deref() == Some(kind))
            .and_then(|entry| entry.date.as_deref())
            .filter(|date| !date.is_empty())
    }

    /// `deliveryTime.endTime`, if present and non-empty
    pub fn delivery_end_time(&self) -> Option<&str> {
        self.delivery_time
            .as_ref()
            .and_then(|time| time.end_time.as_deref())
            .filter(|end| !end.is_empty())
    }
}

/// Error response: `{ response: { errors: [ { message, ... } ] } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub response: Option<ErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub errors: Option<Vec<ApiError>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Parse an error body, tolerating anything that is not the expected JSON
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Message of the first reported error, if any
    pub fn first_message(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|body| body.errors.as_deref())
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_deref())
            .filter(|message| !message.is_empty())
    }
}
