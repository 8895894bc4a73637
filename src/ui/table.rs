use crate::contact::Contact;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Contacts in display column order: ID, First Name, Last Name, Phone, Email
pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return String::new();
    }
    Table::new(contacts).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_table_columns() {
        let rows = vec![Contact {
            id: 1,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: "555-1212".into(),
            email: "jane@x.com".into(),
        }];
        let rendered = contacts_table(&rows);
        let header = rendered.lines().nth(1).unwrap();
        let id = header.find("ID").unwrap();
        let first = header.find("First Name").unwrap();
        let last = header.find("Last Name").unwrap();
        let email = header.find("Email").unwrap();
        assert!(id < first && first < last && last < email);
        assert!(rendered.contains("jane@x.com"));
    }

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(contacts_table(&[]).is_empty());
        assert!(TableBuilder::new().build().is_empty());
        assert!(stats_table(&[("Contacts", "3")]).contains("Contacts"));
    }
}
