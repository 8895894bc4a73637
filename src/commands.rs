use crate::{OutputMode, emit_success};
use addrbook::config::{self, AddrbookConfig};
use addrbook::output::is_quiet;
use addrbook::shell::{Field, ShellState};
use addrbook::ui::{self, Icons, Role, banner, contacts_table, section, stats_table, success, warn};
use addrbook::{ContactFields, ContactStore, Error, SortOrder};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn run_init(output_mode: OutputMode, database: &Path, reset: bool) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    if reset {
        store.reset()?;
    }
    let count = store.count()?;

    if output_mode.is_human() {
        if reset {
            warn(&format!("All contacts in {} were deleted", database.display()));
        }
        success(&format!("Address book ready at {} ({} contacts)", database.display(), count));
    } else {
        emit_success(
            output_mode,
            "init",
            serde_json::json!({ "database": database, "reset": reset, "contacts": count }),
        )?;
    }
    Ok(())
}

pub fn run_add(output_mode: OutputMode, database: &Path, fields: ContactFields) -> anyhow::Result<()> {
    if fields.validate().is_err() {
        anyhow::bail!("Please fill out all entries (first and last name are required)");
    }

    let store = ContactStore::open(database)?;
    let id = store.insert(&fields)?;

    if output_mode.is_human() {
        success(&format!("{} was successfully added. (id {})", fields.display_name(), id));
    } else {
        emit_success(output_mode, "add", serde_json::json!({ "id": id, "contact": fields }))?;
    }
    Ok(())
}

pub fn run_list(output_mode: OutputMode, database: &Path, order: SortOrder) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let contacts = store.fetch_all(order)?;

    if output_mode.is_human() {
        if contacts.is_empty() {
            println!("∅ No contacts found.");
        } else {
            println!("{}", contacts_table(&contacts));
            if !is_quiet() {
                println!("{}", ui::muted(&format!("{} contacts, last name {}", contacts.len(), order)));
            }
        }
    } else {
        emit_success(output_mode, "list", serde_json::json!({ "order": order, "contacts": contacts }))?;
    }
    Ok(())
}

pub fn run_show(output_mode: OutputMode, database: &Path, id: i64) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let contact = store.get(id)?.ok_or(Error::NotFound(id))?;

    if output_mode.is_human() {
        ui::header(&contact.display_name());
        ui::status(Icons::PERSON, "ID", &contact.id.to_string());
        ui::status(Icons::PHONE, "Phone", &contact.phone);
        ui::status(Icons::MAIL, "Email", &contact.email);
    } else {
        emit_success(output_mode, "show", serde_json::json!(contact))?;
    }
    Ok(())
}

pub fn run_update(
    output_mode: OutputMode,
    database: &Path,
    id: i64,
    fields: ContactFields,
) -> anyhow::Result<()> {
    if fields.validate().is_err() {
        anyhow::bail!("Please fill out all entries (first and last name are required)");
    }

    let store = ContactStore::open(database)?;
    let changed = store.update(id, &fields)?;

    if output_mode.is_human() {
        if changed == 0 {
            warn(&format!("No record with id {}; nothing updated", id));
        } else {
            success(&format!("{} was successfully updated.", fields.display_name()));
        }
    } else {
        emit_success(output_mode, "update", serde_json::json!({ "id": id, "changed": changed }))?;
    }
    Ok(())
}

pub fn run_delete(output_mode: OutputMode, database: &Path, id: i64) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let existing = store.get(id)?;
    let removed = store.delete(id)?;

    if output_mode.is_human() {
        match existing {
            Some(contact) if removed > 0 => {
                success(&format!("{} was successfully deleted.", contact.display_name()))
            }
            _ => warn(&format!("No record with id {}; nothing deleted", id)),
        }
    } else {
        emit_success(output_mode, "delete", serde_json::json!({ "id": id, "removed": removed }))?;
    }
    Ok(())
}

pub fn run_dump(output_mode: OutputMode, database: &Path, destination: &Path) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let summary = store.dump(destination)?;

    if output_mode.is_human() {
        if !is_quiet() {
            for line in &summary.statements {
                println!("{}", line);
            }
        }
        success(&format!("File written to disk: {}", destination.display()));
    } else {
        emit_success(
            output_mode,
            "dump",
            serde_json::json!({
                "destination": summary.destination,
                "statements": summary.statements.len(),
                "contacts": summary.rows,
            }),
        )?;
    }
    Ok(())
}

pub fn run_restore(output_mode: OutputMode, database: &Path, input: &Path) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let restored = store.restore(input)?;

    if output_mode.is_human() {
        success(&format!("Restored {} contacts from {}", restored, input.display()));
    } else {
        emit_success(output_mode, "restore", serde_json::json!({ "contacts": restored }))?;
    }
    Ok(())
}

pub fn run_stats(output_mode: OutputMode, database: &Path, order: SortOrder) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let count = store.count()?;
    let size = std::fs::metadata(store.path()).map(|m| m.len()).unwrap_or(0);

    if output_mode.is_human() {
        println!("{} Address Book Statistics", Icons::STATS);
        let path = database.display().to_string();
        let count = count.to_string();
        let size = format!("{} bytes", size);
        println!(
            "{}",
            stats_table(&[
                ("Database", path.as_str()),
                ("Contacts", count.as_str()),
                ("File size", size.as_str()),
                ("List order", order.as_str()),
            ])
        );
    } else {
        emit_success(
            output_mode,
            "stats",
            serde_json::json!({ "database": database, "contacts": count, "bytes": size, "order": order }),
        )?;
    }
    Ok(())
}

pub fn run_config_init(
    output_mode: OutputMode,
    path: &Path,
    settings: &AddrbookConfig,
    force: bool,
) -> anyhow::Result<()> {
    config::write_config(path, settings, force)?;

    if output_mode.is_human() {
        success(&format!("Config written to {}", path.display()));
    } else {
        emit_success(output_mode, "config", serde_json::json!({ "path": path, "config": settings }))?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        banner(
            &ui::theme().paint(Role::Accent, "addrbook"),
            &format!("Version {}", env!("CARGO_PKG_VERSION")),
        );
    } else {
        emit_success(output_mode, "version", serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }))?;
    }
    Ok(())
}

const SHELL_HELP: &str = r#"Commands:
  set <field> <value>   edit the form (fields: first, last, phone, email)
  add                   add the form as a new contact
  select <id>           load a contact into the form
  update                save the form over the selected contact
  delete                delete the selected contact
  clear                 clear the form and selection
  order <asc|desc>      change list order
  list                  reprint the contact list
  form                  show the form
  help                  show this help
  quit                  leave the shell"#;

/// Line-oriented address book driven by `ShellState`
pub fn run_shell(database: &Path, order: SortOrder) -> anyhow::Result<()> {
    let store = ContactStore::open(database)?;
    let mut state = ShellState::new(order);
    state.refresh(&store)?;

    banner(
        &ui::theme().paint(Role::Title, "Address Book"),
        &format!("{} - type 'help' for commands", database.display()),
    );
    render(&state);

    let stdin = io::stdin();
    loop {
        print!("{} ", ui::theme().paint(Role::Accent, ">"));
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let outcome = match command {
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                println!("{}", SHELL_HELP);
                continue;
            }
            "form" => {
                render_form(&state);
                continue;
            }
            "list" => state.refresh(&store),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match field.parse::<Field>() {
                    Ok(field) => {
                        state.set_field(field, value.trim());
                        render_form(&state);
                        continue;
                    }
                    Err(e) => Err(e),
                }
            }
            "add" => state.add(&store),
            "select" => match rest.parse::<i64>() {
                Ok(id) => state.select(&store, id).map(|_| render_form(&state)),
                Err(_) => Err(Error::Validation(format!("Not a record id: {}", rest))),
            },
            "update" => state.update_selected(&store),
            "delete" => state.delete_selected(&store),
            "clear" => {
                state.clear_selection();
                state.status.clear();
                render_form(&state);
                continue;
            }
            "order" => match rest.parse::<SortOrder>() {
                Ok(order) => {
                    state.order = order;
                    state.refresh(&store)
                }
                Err(e) => Err(e),
            },
            other => Err(Error::Validation(format!("Unknown command: {} (try 'help')", other))),
        };

        match outcome {
            Ok(()) => render(&state),
            Err(e) => ui::error(&e.to_string()),
        }
    }

    Ok(())
}

fn render(state: &ShellState) {
    section("Contact List");
    if state.rows.is_empty() {
        println!("∅ No contacts found.");
    } else {
        println!("{}", contacts_table(&state.rows));
    }
    if !state.status.is_empty() {
        println!("{} {}", Icons::INFO, state.status);
    }
}

fn render_form(state: &ShellState) {
    let selected = state
        .selected
        .as_ref()
        .map(|c| format!("id {}", c.id))
        .unwrap_or_else(|| "none".to_string());
    ui::info("Selected", &selected);
    ui::status(Icons::PERSON, "First Name", &state.form.first_name);
    ui::status(Icons::PERSON, "Last Name", &state.form.last_name);
    ui::status(Icons::PHONE, "Phone", &state.form.phone);
    ui::status(Icons::MAIL, "Email", &state.form.email);
    if !state.status.is_empty() {
        println!("{}", ui::dim(&state.status));
    }
}
