//! SQLite storage implementation

use std::fs;
use std::path::{Path, PathBuf};
use rusqlite::{Connection, OptionalExtension, params};
use crate::{Error, Result};
use crate::contact::{Contact, ContactFields, SortOrder};
use super::dump::{self, DumpSummary};
use super::schema;

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, phone, email FROM tbl_address_book";

/// SQLite-backed storage for contacts.
///
/// Holds only the path: every operation opens its own connection and drops
/// it before returning.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Open a database file (creates it and the contact table if missing)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        store.initialize_schema()?;
        tracing::info!("Opened contact store at {}", store.path.display());
        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.with_connection("initialize", |conn| {
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }
            Ok(())
        })
    }

    /// Drop and recreate the contact table. All contacts are lost.
    pub fn reset(&self) -> Result<()> {
        self.with_connection("reset", |conn| {
            conn.execute(schema::DROP_CONTACT_TABLE, [])?;
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }
            Ok(())
        })?;
        tracing::warn!("Contact table at {} was dropped and recreated", self.path.display());
        Ok(())
    }

    /// Run `f` against a fresh connection, logging any fault before
    /// handing it back to the caller.
    fn with_connection<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let result = Connection::open(&self.path)
            .map_err(Error::from)
            .and_then(|conn| f(&conn));

        if let Err(e) = &result {
            tracing::error!(operation, path = %self.path.display(), "SQLite error: {}", e);
        }
        result
    }

    // ========== Contact Operations ==========

    /// Insert a new contact and return its store-assigned id
    pub fn insert(&self, fields: &ContactFields) -> Result<i64> {
        let id = self.with_connection("insert", |conn| {
            conn.execute(
                r#"
                INSERT INTO tbl_address_book (first_name, last_name, phone, email)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![fields.first_name, fields.last_name, fields.phone, fields.email],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        tracing::info!("Inserted contact {} ({})", id, fields.display_name());
        Ok(id)
    }

    /// All contacts ordered by last name. Empty store gives an empty Vec.
    pub fn fetch_all(&self, order: SortOrder) -> Result<Vec<Contact>> {
        self.with_connection("fetch_all", |conn| {
            let sql = format!("{} ORDER BY last_name {}", SELECT_COLUMNS, order.as_sql());
            let mut stmt = conn.prepare(&sql)?;
            let contacts = stmt
                .query_map([], row_to_contact)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            tracing::debug!("Fetched {} contacts ({})", contacts.len(), order);
            Ok(contacts)
        })
    }

    /// Get a contact by id
    pub fn get(&self, id: i64) -> Result<Option<Contact>> {
        self.with_connection("get", |conn| {
            conn.query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                row_to_contact,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Replace all four text fields of the contact with `id`.
    ///
    /// Returns the number of rows changed; an unknown id changes nothing
    /// and is not an error.
    pub fn update(&self, id: i64, fields: &ContactFields) -> Result<usize> {
        let changed = self.with_connection("update", |conn| {
            let changed = conn.execute(
                r#"
                UPDATE tbl_address_book
                SET first_name = ?1,
                    last_name = ?2,
                    phone = ?3,
                    email = ?4
                WHERE id = ?5
                "#,
                params![fields.first_name, fields.last_name, fields.phone, fields.email, id],
            )?;
            Ok(changed)
        })?;
        if changed == 0 {
            tracing::debug!("Update matched no contact with id {}", id);
        } else {
            tracing::info!("Updated contact {}", id);
        }
        Ok(changed)
    }

    /// Delete the contact with `id`. Returns rows removed (0 or 1).
    pub fn delete(&self, id: i64) -> Result<usize> {
        let removed = self.with_connection("delete", |conn| {
            Ok(conn.execute("DELETE FROM tbl_address_book WHERE id = ?1", [id])?)
        })?;
        if removed == 0 {
            tracing::debug!("Delete matched no contact with id {}", id);
        } else {
            tracing::info!("Deleted contact {}", id);
        }
        Ok(removed)
    }

    /// Count all contacts
    pub fn count(&self) -> Result<usize> {
        self.with_connection("count", |conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM tbl_address_book", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    // ========== Dump / Restore ==========

    /// Render the whole store as SQL statements, one per element
    pub fn dump_statements(&self) -> Result<Vec<String>> {
        self.with_connection("dump", dump::statements)
    }

    /// Write the store as SQL text to `destination`, one statement per line
    /// (table definitions keep their own line breaks).
    ///
    /// Each statement is also logged at debug level.
    pub fn dump(&self, destination: &Path) -> Result<DumpSummary> {
        let statements = self.dump_statements()?;
        let rows = self.count()?;
        dump::write_statements(destination, &statements).inspect_err(|e| {
            tracing::error!(path = %destination.display(), "Failed to write dump: {}", e);
        })?;
        tracing::info!(
            "Dumped {} statements to {}",
            statements.len(),
            destination.display()
        );
        Ok(DumpSummary {
            destination: destination.to_path_buf(),
            statements,
            rows,
        })
    }

    /// Replace the contact table with the contents of a dump file.
    ///
    /// The drop and the replay share one transaction: a script that fails,
    /// or that never creates the contact table, leaves the store unchanged.
    pub fn restore(&self, source: &Path) -> Result<usize> {
        let script = strip_transaction_control(&fs::read_to_string(source)?);
        self.with_connection("restore", |conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(schema::DROP_CONTACT_TABLE, [])?;
            tx.execute_batch(&script)?;

            let created: i64 = tx.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [schema::CONTACT_TABLE],
                |row| row.get(0),
            )?;
            if created == 0 {
                return Err(Error::Validation(format!(
                    "{} does not create {}",
                    source.display(),
                    schema::CONTACT_TABLE
                )));
            }

            // The dump may predate the last_name index
            for stmt in schema::all_schema_statements() {
                tx.execute(stmt, [])?;
            }
            tx.commit()?;
            Ok(())
        })?;
        let restored = self.count()?;
        tracing::info!("Restored {} contacts from {}", restored, source.display());
        Ok(restored)
    }
}

/// Drop the dump's own BEGIN/COMMIT lines so the replay can run inside the
/// caller's transaction.
fn strip_transaction_control(script: &str) -> String {
    script
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.eq_ignore_ascii_case("BEGIN TRANSACTION;") && !line.eq_ignore_ascii_case("COMMIT;")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Helper to convert a row to a Contact. NULL text columns read as "".
fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        last_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        phone: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        email: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}
