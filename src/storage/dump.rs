//! SQL text dumps
//!
//! Produces the same shape as the sqlite3 shell's `.dump`: a transaction
//! wrapping each table's CREATE statement and one INSERT per row, followed
//! by index, trigger and view definitions. Every row statement is a single
//! line; line breaks inside text values are written as `char(10)`/`char(13)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use crate::Result;

/// Outcome of writing a dump file
#[derive(Debug, Clone)]
pub struct DumpSummary {
    pub destination: PathBuf,
    pub statements: Vec<String>,
    /// Contacts captured in the dump
    pub rows: usize,
}

impl std::fmt::Display for DumpSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dump Summary:")?;
        writeln!(f, "  Destination: {}", self.destination.display())?;
        writeln!(f, "  Statements: {}", self.statements.len())?;
        writeln!(f, "  Contacts: {}", self.rows)
    }
}

/// Render every object in the database as SQL statements
pub fn statements(conn: &Connection) -> Result<Vec<String>> {
    let mut out = vec!["BEGIN TRANSACTION;".to_string()];

    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master WHERE sql NOT NULL AND type = 'table' ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for (name, sql) in tables {
        if name == "sqlite_sequence" {
            out.push("DELETE FROM \"sqlite_sequence\";".to_string());
        } else if name.starts_with("sqlite_") {
            continue;
        } else {
            out.push(format!("{};", sql));
        }
        insert_statements(conn, &name, &mut out)?;
    }

    let mut stmt = conn.prepare(
        "SELECT sql FROM sqlite_master WHERE sql NOT NULL AND type IN ('index', 'trigger', 'view') ORDER BY name",
    )?;
    let others = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    out.extend(others.into_iter().map(|sql| format!("{};", sql)));

    out.push("COMMIT;".to_string());
    Ok(out)
}

fn insert_statements(conn: &Connection, table: &str, out: &mut Vec<String>) -> Result<()> {
    let table = quote_identifier(table);
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table))?;
    let columns = stmt.column_count();
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let values = (0..columns)
            .map(|i| row.get_ref(i).map(sql_literal))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(format!("INSERT INTO {} VALUES({});", table, values.join(",")));
    }
    Ok(())
}

/// Write statements one per line, logging each at debug level
pub fn write_statements(destination: &Path, statements: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(destination)?);
    for line in statements {
        tracing::debug!(target: "addrbook::dump", "{}", line);
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

/// Double-quoted SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render a column value as a SQL literal
pub fn sql_literal(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) if f.is_nan() => "NULL".to_string(),
        ValueRef::Real(f) if f.is_infinite() => {
            if f > 0.0 { "1e999".to_string() } else { "-1e999".to_string() }
        }
        ValueRef::Real(f) => format!("{:?}", f),
        ValueRef::Text(bytes) => text_literal(&String::from_utf8_lossy(bytes)),
        ValueRef::Blob(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
            format!("X'{}'", hex)
        }
    }
}

/// Quoted text literal that never spans lines: CR and LF are spliced in
/// as `char(13)` / `char(10)`.
fn text_literal(text: &str) -> String {
    let quote = |part: &str| format!("'{}'", part.replace('\'', "''"));
    if !text.contains(['\n', '\r']) {
        return quote(text);
    }

    let mut parts = Vec::new();
    let mut segment_start = 0;
    for (i, c) in text.char_indices() {
        let code = match c {
            '\n' => "char(10)",
            '\r' => "char(13)",
            _ => continue,
        };
        parts.push(quote(&text[segment_start..i]));
        parts.push(code.to_string());
        segment_start = i + c.len_utf8();
    }
    parts.push(quote(&text[segment_start..]));
    format!("({})", parts.join("||"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_literal() {
        assert_eq!(sql_literal(ValueRef::Null), "NULL");
        assert_eq!(sql_literal(ValueRef::Integer(42)), "42");
        assert_eq!(sql_literal(ValueRef::Real(1.5)), "1.5");
        assert_eq!(sql_literal(ValueRef::Text(b"it's")), "'it''s'");
        assert_eq!(sql_literal(ValueRef::Blob(&[0x0a, 0xff])), "X'0AFF'");
    }

    #[test]
    fn test_text_with_newlines_stays_on_one_line() {
        let literal = sql_literal(ValueRef::Text(b"12 Main St\r\nApt 'B'"));
        assert_eq!(literal, "('12 Main St'||char(13)||''||char(10)||'Apt ''B''')");
        assert!(!literal.contains('\n'));

        let conn = Connection::open_in_memory().unwrap();
        let value: String = conn
            .query_row(&format!("SELECT {}", literal), [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "12 Main St\r\nApt 'B'");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("tbl_address_book"), "\"tbl_address_book\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_statements_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        let stmts = statements(&conn).unwrap();
        assert_eq!(stmts, vec!["BEGIN TRANSACTION;", "COMMIT;"]);
    }

    #[test]
    fn test_statements_include_rows_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        for stmt in crate::storage::schema::all_schema_statements() {
            conn.execute(stmt, []).unwrap();
        }
        conn.execute(
            "INSERT INTO tbl_address_book VALUES (NULL, 'Jane', 'Doe', NULL, 'jane@x.com')",
            [],
        )
        .unwrap();

        let stmts = statements(&conn).unwrap();
        assert!(stmts[1].starts_with("CREATE TABLE tbl_address_book"));
        assert_eq!(
            stmts[2],
            "INSERT INTO \"tbl_address_book\" VALUES(1,'Jane','Doe',NULL,'jane@x.com');"
        );
        assert!(stmts[3].starts_with("CREATE INDEX idx_address_book_last_name"));
        assert_eq!(stmts.len(), 5);
    }
}
