//! Presentation state for the interactive address book.
//!
//! All form, selection and status state lives in `ShellState`. Handlers take
//! the state and the store, talk to the store, and leave the state ready to
//! render. User mistakes (missing names, nothing selected) end up in
//! `status`; store faults are returned as errors.

use crate::contact::{Contact, ContactFields, SortOrder};
use crate::storage::ContactStore;
use crate::{Error, Result};

pub const MSG_FILL_REQUIRED: &str = "Please fill out all entries";
pub const MSG_SELECT_TO_MODIFY: &str = "Please select a record to modify.";
pub const MSG_SELECT_TO_DELETE: &str = "Please select a record to delete";

/// Form field addressed by `set_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Phone,
    Email,
}

impl std::str::FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "first" | "first_name" | "firstname" => Ok(Field::FirstName),
            "last" | "last_name" | "lastname" => Ok(Field::LastName),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            _ => Err(Error::Validation(format!("Unknown field: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellState {
    /// Current contents of the entry form
    pub form: ContactFields,
    /// Contact picked from the list, if any
    pub selected: Option<Contact>,
    /// Rows as last fetched from the store
    pub rows: Vec<Contact>,
    /// One-line feedback for the user
    pub status: String,
    pub order: SortOrder,
}

impl ShellState {
    pub fn new(order: SortOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.form.first_name = value,
            Field::LastName => self.form.last_name = value,
            Field::Phone => self.form.phone = value,
            Field::Email => self.form.email = value,
        }
    }

    /// Re-read all rows in the current order
    pub fn refresh(&mut self, store: &ContactStore) -> Result<()> {
        self.rows = store.fetch_all(self.order)?;
        Ok(())
    }

    /// Insert the form as a new contact
    pub fn add(&mut self, store: &ContactStore) -> Result<()> {
        self.status.clear();
        if self.form.validate().is_err() {
            self.status = MSG_FILL_REQUIRED.to_string();
        } else {
            store.insert(&self.form)?;
            self.status = format!("{} was successfully added.", self.form.display_name());
        }
        self.form.clear();
        self.refresh(store)
    }

    /// Select a contact and load it into the form
    pub fn select(&mut self, store: &ContactStore, id: i64) -> Result<()> {
        match store.get(id)? {
            Some(contact) => {
                self.form = contact.fields();
                self.selected = Some(contact);
                self.status.clear();
            }
            None => {
                self.selected = None;
                self.status = format!("No record with id {}", id);
            }
        }
        Ok(())
    }

    /// Write the form back to the selected contact
    pub fn update_selected(&mut self, store: &ContactStore) -> Result<()> {
        let Some(id) = self.selected.as_ref().map(|c| c.id) else {
            self.status = MSG_SELECT_TO_MODIFY.to_string();
            return Ok(());
        };
        if self.form.validate().is_err() {
            self.status = MSG_FILL_REQUIRED.to_string();
            return Ok(());
        }

        let changed = store.update(id, &self.form)?;
        self.status = if changed == 0 {
            format!("No record with id {}", id)
        } else {
            format!("{} was successfully updated.", self.form.display_name())
        };
        self.clear_selection();
        self.refresh(store)
    }

    /// Delete the selected contact
    pub fn delete_selected(&mut self, store: &ContactStore) -> Result<()> {
        let Some(selected) = self.selected.take() else {
            self.status = MSG_SELECT_TO_DELETE.to_string();
            return Ok(());
        };

        let removed = store.delete(selected.id)?;
        self.status = if removed == 0 {
            format!("No record with id {}", selected.id)
        } else {
            format!("{} was successfully deleted.", selected.display_name())
        };
        self.clear_selection();
        self.refresh(store)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.form.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContactStore, ShellState) {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::open(dir.path().join("shell.db")).unwrap();
        let mut state = ShellState::new(SortOrder::Asc);
        state.refresh(&store).unwrap();
        (dir, store, state)
    }

    fn fill(state: &mut ShellState, first: &str, last: &str) {
        state.set_field(Field::FirstName, first);
        state.set_field(Field::LastName, last);
        state.set_field(Field::Phone, "555-1212");
        state.set_field(Field::Email, "someone@x.com");
    }

    #[test]
    fn test_add_requires_names() {
        let (_dir, store, mut state) = setup();
        state.set_field(Field::FirstName, "Jane");
        state.add(&store).unwrap();

        assert_eq!(state.status, MSG_FILL_REQUIRED);
        assert!(state.rows.is_empty());
        assert!(state.form.is_empty());
    }

    #[test]
    fn test_add_then_list() {
        let (_dir, store, mut state) = setup();
        fill(&mut state, "Jane", "Doe");
        state.add(&store).unwrap();

        assert_eq!(state.status, "Jane Doe was successfully added.");
        assert_eq!(state.rows.len(), 1);
        assert!(state.form.is_empty());
    }

    #[test]
    fn test_update_without_selection() {
        let (_dir, store, mut state) = setup();
        fill(&mut state, "Jane", "Doe");
        state.update_selected(&store).unwrap();
        assert_eq!(state.status, MSG_SELECT_TO_MODIFY);

        state.delete_selected(&store).unwrap();
        assert_eq!(state.status, MSG_SELECT_TO_DELETE);
    }

    #[test]
    fn test_select_update_delete() {
        let (_dir, store, mut state) = setup();
        fill(&mut state, "Jane", "Doe");
        state.add(&store).unwrap();
        let id = state.rows[0].id;

        state.select(&store, id).unwrap();
        assert_eq!(state.form.last_name, "Doe");
        assert_eq!(state.selected.as_ref().map(|c| c.id), Some(id));

        state.set_field(Field::LastName, "Smith");
        state.update_selected(&store).unwrap();
        assert_eq!(state.status, "Jane Smith was successfully updated.");
        assert!(state.selected.is_none());
        assert_eq!(state.rows[0].last_name, "Smith");

        state.select(&store, id).unwrap();
        state.delete_selected(&store).unwrap();
        assert_eq!(state.status, "Jane Smith was successfully deleted.");
        assert!(state.rows.is_empty());
    }

    #[test]
    fn test_delete_of_vanished_selection() {
        let (_dir, store, mut state) = setup();
        fill(&mut state, "Jane", "Doe");
        state.add(&store).unwrap();
        let id = state.rows[0].id;

        state.select(&store, id).unwrap();
        store.delete(id).unwrap();
        state.delete_selected(&store).unwrap();

        assert_eq!(state.status, format!("No record with id {}", id));
        assert!(state.selected.is_none());
        assert!(state.rows.is_empty());
    }

    #[test]
    fn test_select_unknown_id() {
        let (_dir, store, mut state) = setup();
        state.select(&store, 42).unwrap();
        assert!(state.selected.is_none());
        assert_eq!(state.status, "No record with id 42");
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("first".parse::<Field>().unwrap(), Field::FirstName);
        assert_eq!("Last_Name".parse::<Field>().unwrap(), Field::LastName);
        assert!("address".parse::<Field>().is_err());
    }
}
