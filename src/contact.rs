//! Contact types
//!
//! A `Contact` is one row of the address book. `ContactFields` carries the
//! four user-editable text fields and is what insert and update take, since
//! the id is always assigned by the store.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::Tabled;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Contact {
    /// Store-assigned primary key, immutable once assigned
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "First Name")]
    pub first_name: String,
    #[tabled(rename = "Last Name")]
    pub last_name: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Email")]
    pub email: String,
}

impl Contact {
    /// The editable fields of this contact
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }

    /// "First Last", as shown in status messages
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The four text fields of a contact, without an id.
///
/// Used for inserts and for wholesale updates; partial updates are not
/// supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// First and last name must be non-empty. Phone and email are free text.
    ///
    /// The store itself does not enforce this; callers check before insert.
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::Validation(
                "first and last name are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Listing order over `last_name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for ORDER BY
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(Error::Validation(format!("Unknown sort order: {}", s))),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_names() {
        assert!(ContactFields::new("Jane", "Doe", "", "").validate().is_ok());
        assert!(ContactFields::new("", "Doe", "555-1212", "").validate().is_err());
        assert!(ContactFields::new("Jane", "  ", "", "jane@x.com").validate().is_err());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default().as_sql(), "ASC");
    }

    #[test]
    fn test_fields_roundtrip_through_contact() {
        let contact = Contact {
            id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: String::new(),
            email: "ada@example.com".into(),
        };
        let fields = contact.fields();
        assert_eq!(fields.display_name(), contact.display_name());
        assert_eq!(fields.email, "ada@example.com");
    }
}
