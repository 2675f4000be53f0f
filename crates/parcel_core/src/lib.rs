//! Core parcel tracking: registration, address update, status change and
//! deletion over a single SQLite table.
//! This crate is the single source of truth for the registered-only gate.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DbConfig};
pub use error::{RepoError, RepoResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::parcel::{
    next_status, ClientId, Parcel, ParcelNumber, ParcelValidationError, STATUS_DELIVERED,
    STATUS_REGISTERED, STATUS_SENT,
};
pub use repo::parcel_repo::{ParcelRepository, SqliteParcelRepository};
pub use service::parcel_service::ParcelService;

#[cfg(test)]
mod tests {
    use super::{next_status, Parcel, ParcelValidationError, STATUS_DELIVERED, STATUS_SENT};

    #[test]
    fn new_parcel_starts_registered_and_valid() {
        let parcel = Parcel::new(1000, "test");
        assert_eq!(parcel.number, 0);
        assert!(parcel.is_registered());
        assert!(parcel.validate().is_ok());
    }

    #[test]
    fn next_status_follows_delivery_flow() {
        assert_eq!(next_status("registered"), Some(STATUS_SENT));
        assert_eq!(next_status("sent"), Some(STATUS_DELIVERED));
        assert_eq!(next_status("delivered"), None);
        assert_eq!(next_status("lost"), None);
    }

    #[test]
    fn validate_rejects_blank_address_and_bad_timestamp() {
        let mut parcel = Parcel::new(1, "  ");
        assert_eq!(parcel.validate(), Err(ParcelValidationError::EmptyAddress));

        parcel.address = "street".to_string();
        parcel.status = String::new();
        assert_eq!(parcel.validate(), Ok(()));

        parcel.created_at = "yesterday".to_string();
        assert_eq!(
            parcel.validate(),
            Err(ParcelValidationError::InvalidCreatedAt("yesterday".to_string()))
        );
    }
}
