//! Database schema definitions

/// Name of the contact table
pub const CONTACT_TABLE: &str = "tbl_address_book";

/// SQL to create the contact table.
///
/// Idempotent: running it against an existing store keeps its rows.
pub const CREATE_CONTACT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_address_book(
    id          INTEGER PRIMARY KEY,
    first_name  TEXT,
    last_name   TEXT,
    phone       TEXT,
    email       TEXT
)
"#;

/// SQL to drop the contact table. Only used by an explicit reset.
pub const DROP_CONTACT_TABLE: &str = "DROP TABLE IF EXISTS tbl_address_book";

/// Index backing the ORDER BY last_name listing
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_address_book_last_name ON tbl_address_book(last_name)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_CONTACT_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
