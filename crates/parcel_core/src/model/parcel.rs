//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical parcel record stored in the `parcel` table.
//! - Provide lifecycle helpers for the registered -> sent -> delivered flow.
//!
//! # Invariants
//! - `number` is assigned by the store; `0` marks an unsaved parcel.
//! - `address` may change only while `status == STATUS_REGISTERED`.
//! - `created_at` is an RFC 3339 UTC timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Opaque identifier of the client owning a parcel.
pub type ClientId = i64;

/// Initial status. The only value that permits address changes and deletion.
pub const STATUS_REGISTERED: &str = "registered";
/// Parcel handed over to the carrier.
pub const STATUS_SENT: &str = "sent";
/// Parcel received by the client.
pub const STATUS_DELIVERED: &str = "delivered";

/// Tracked shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Primary identifier. Ignored on insert.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub address: String,
    /// Open-ended lifecycle label.
    pub status: String,
    pub created_at: String,
}

/// Validation errors for parcel write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    EmptyAddress,
    InvalidCreatedAt(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "parcel address cannot be empty"),
            Self::InvalidCreatedAt(value) => {
                write!(f, "parcel created_at `{value}` is not an RFC 3339 timestamp")
            }
        }
    }
}

impl Error for ParcelValidationError {}

impl Parcel {
    /// Creates an unsaved parcel in `registered` status stamped with the
    /// current UTC time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            address: address.into(),
            status: STATUS_REGISTERED.to_string(),
            created_at: now_rfc3339(),
        }
    }

    /// Returns whether address changes and deletion are currently allowed.
    pub fn is_registered(&self) -> bool {
        self.status == STATUS_REGISTERED
    }

    /// Checks the record shape before it is written.
    ///
    /// Status is stored as given, including empty labels.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        validate_address(&self.address)?;
        if DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(ParcelValidationError::InvalidCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }
}

/// Returns the status that follows `current` in the delivery flow.
///
/// `delivered` and unknown labels have no successor.
pub fn next_status(current: &str) -> Option<&'static str> {
    match current {
        STATUS_REGISTERED => Some(STATUS_SENT),
        STATUS_SENT => Some(STATUS_DELIVERED),
        _ => None,
    }
}

pub(crate) fn validate_address(address: &str) -> Result<(), ParcelValidationError> {
    if address.trim().is_empty() {
        return Err(ParcelValidationError::EmptyAddress);
    }
    Ok(())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
