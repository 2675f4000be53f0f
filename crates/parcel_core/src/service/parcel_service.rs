//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide registration and delivery-flow entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or the registered-only
//!   gate.
//! - Service layer remains storage-agnostic.

use crate::error::RepoResult;
use crate::model::parcel::{next_status, ClientId, Parcel, ParcelNumber};
use crate::repo::parcel_repo::ParcelRepository;
use log::info;

/// Use-case service wrapper for parcel operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client`.
    ///
    /// # Contract
    /// - Status starts as `registered`, `created_at` is the current time.
    /// - Returns the stored parcel with its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.repo.add(&parcel)?;
        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, client
        );
        Ok(parcel)
    }

    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Lists all parcels of one client.
    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Advances the parcel along `registered -> sent -> delivered`.
    ///
    /// Returns the new status, or `None` when the current status has no
    /// successor (nothing is written in that case). The write only applies
    /// while the status is still the one read; a concurrent change yields
    /// `StatusConflict`.
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<Option<String>> {
        let parcel = self.repo.get(number)?;
        let Some(next) = next_status(&parcel.status) else {
            info!(
                "event=parcel_next_status module=service status=skip number={} parcel_status={}",
                number, parcel.status
            );
            return Ok(None);
        };

        self.repo.set_status_if(number, &parcel.status, next)?;
        info!(
            "event=parcel_next_status module=service status=ok number={} from={} to={}",
            number, parcel.status, next
        );
        Ok(Some(next.to_string()))
    }

    /// Sets an arbitrary status. Missing parcels are a silent no-op.
    pub fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        self.repo.set_status(number, status)
    }

    /// Changes the delivery address of a registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Deletes a registered parcel.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
