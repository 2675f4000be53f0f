//! Parcel domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by repository and service code.
//!
//! # Invariants
//! - Every stored parcel is identified by a store-assigned `ParcelNumber`.
//! - Deletion is a hard delete and only allowed for registered parcels.

pub mod parcel;
