//! Parcel repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the canonical `parcel` table.
//! - Enforce the registered-only gate for address changes and deletion.
//!
//! # Invariants
//! - `add` and `set_address` validate their input before SQL mutations.
//! - Status values are stored as given; any label may be set at any time.
//! - Guarded mutations are a single conditional statement keyed on both
//!   `number` and the required status; there is no read-then-write gap.
//! - `set_status` on a missing number is a silent no-op.

use crate::db::schema::check_schema;
use crate::error::{RepoError, RepoResult};
use crate::model::parcel::{validate_address, ClientId, Parcel, ParcelNumber, STATUS_REGISTERED};
use log::{info, warn};
use rusqlite::{
    params, Connection, OptionalExtension, Params, Row, Transaction, TransactionBehavior,
};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    address,
    status,
    created_at
FROM parcel";

/// Repository interface for parcel operations.
pub trait ParcelRepository {
    /// Inserts a parcel and returns the store-assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Gets one parcel, or `NotFound`.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists every parcel of `client` in insertion order.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites status. A missing number is not an error.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Overwrites status, failing with `NotFound` for a missing number.
    fn set_status_checked(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Overwrites status only while it still equals `expected`.
    ///
    /// Fails with `StatusConflict` when another writer changed it first.
    fn set_status_if(&self, number: ParcelNumber, expected: &str, status: &str) -> RepoResult<()>;
    /// Overwrites address while the parcel is still registered.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Deletes the parcel while it is still registered.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel repository.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        check_schema(conn)?;
        Ok(Self { conn })
    }

    fn update_status(&self, number: ParcelNumber, status: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status, number],
        )?;
        info!(
            "event=parcel_set_status module=repo status=ok number={} changed={}",
            number, changed
        );
        Ok(changed)
    }

    /// Runs a statement that only matches rows in the required status.
    ///
    /// A zero-row outcome is classified inside the same immediate
    /// transaction: `NotFound` when the row is gone, otherwise the error
    /// built by `rejected` from the status actually stored.
    fn guarded_mutation(
        &self,
        event: &str,
        number: ParcelNumber,
        sql: &str,
        params: impl Params,
        rejected: impl FnOnce(String) -> RepoError,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(sql, params)?;

        if changed == 0 {
            let current: Option<String> = tx
                .query_row(
                    "SELECT status FROM parcel WHERE number = ?1;",
                    [number],
                    |row| row.get(0),
                )
                .optional()?;
            tx.rollback()?;

            return Err(match current {
                None => {
                    warn!("event={event} module=repo status=error number={number} error_code=not_found");
                    RepoError::NotFound(number)
                }
                Some(status) => {
                    warn!(
                        "event={event} module=repo status=error number={number} error_code=status_mismatch parcel_status={status}"
                    );
                    rejected(status)
                }
            });
        }

        tx.commit()?;
        info!("event={event} module=repo status=ok number={number}");
        Ok(())
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        parcel.validate()?;

        self.conn.execute(
            "INSERT INTO parcel (
                client,
                status,
                address,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        let number = self.conn.last_insert_rowid();
        info!(
            "event=parcel_add module=repo status=ok number={} client={}",
            number, parcel.client
        );
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        if let Some(row) = rows.next()? {
            return parse_parcel_row(row);
        }

        Err(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL} WHERE client = ?1 ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        self.update_status(number, status)?;
        Ok(())
    }

    fn set_status_checked(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        if self.update_status(number, status)? == 0 {
            return Err(RepoError::NotFound(number));
        }
        Ok(())
    }

    fn set_status_if(
        &self,
        number: ParcelNumber,
        expected: &str,
        status: &str,
    ) -> RepoResult<()> {
        self.guarded_mutation(
            "parcel_set_status_if",
            number,
            "UPDATE parcel
             SET status = ?1
             WHERE number = ?2
               AND status = ?3;",
            params![status, number, expected],
            |actual| RepoError::StatusConflict {
                number,
                expected: expected.to_string(),
                actual,
            },
        )
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        validate_address(address)?;
        self.guarded_mutation(
            "parcel_set_address",
            number,
            "UPDATE parcel
             SET address = ?1
             WHERE number = ?2
               AND status = ?3;",
            params![address, number, STATUS_REGISTERED],
            |status| RepoError::InvalidTransition { number, status },
        )
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.guarded_mutation(
            "parcel_delete",
            number,
            "DELETE FROM parcel
             WHERE number = ?1
               AND status = ?2;",
            params![number, STATUS_REGISTERED],
            |status| RepoError::InvalidTransition { number, status },
        )
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let number: ParcelNumber = row.get("number")?;
    if number <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid parcel number `{number}` in parcel.number"
        )));
    }

    Ok(Parcel {
        number,
        client: row.get("client")?,
        address: row.get("address")?,
        status: row.get("status")?,
        created_at: row.get("created_at")?,
    })
}
