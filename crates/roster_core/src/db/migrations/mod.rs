//! Embedded schema steps for the roster database.
//!
//! # Responsibility
//! - List the people/notes/todos schema steps in the order they shipped.
//! - Bring a database from its recorded step up to the newest one.
//!
//! # Invariants
//! - Steps are numbered 1..=N without gaps; `PRAGMA user_version` holds the
//!   last applied number.
//! - All pending steps apply in one transaction: an upgrade either reaches
//!   `latest_version()` or leaves the file untouched.
//! - A file recorded past `latest_version()` is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    name: &'static str,
    sql: &'static str,
}

/// Step `n` lives at index `n - 1`.
const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        name: "relation_indexes",
        sql: include_str!("0002_relation_indexes.sql"),
    },
];

/// Newest schema step this binary knows.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Applies every step after the one recorded in `PRAGMA user_version`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let recorded = recorded_version(conn)?;
    let latest = latest_version();
    if recorded > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: recorded,
            latest_supported: latest,
        });
    }
    if recorded == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for version in (recorded + 1)..=latest {
        apply_step(&tx, version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={recorded} to_version={latest}");
    Ok(())
}

fn apply_step(tx: &Transaction<'_>, version: u32) -> DbResult<()> {
    let step = &SCHEMA_STEPS[(version - 1) as usize];
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", version)?;
    info!(
        "event=db_migrate_step module=db status=ok version={version} name={}",
        step.name
    );
    Ok(())
}

fn recorded_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
