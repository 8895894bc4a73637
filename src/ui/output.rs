use crate::ui::theme::Role;
use crate::ui::{theme, Icons};

pub fn header(text: &str) {
    println!("{} {}", Icons::BOOK, theme().paint(Role::Title, text));
}

pub fn banner(title: &str, subtitle: &str) {
    println!();
    println!("{} {}", Icons::BOOK, title);
    println!("   {}", theme().paint(Role::Label, subtitle));
    println!();
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, theme().paint(Role::Label, label), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, theme().paint(Role::Success, label));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, theme().paint(Role::Error, label));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, theme().paint(Role::Warn, label));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        theme().paint(Role::Accent, Icons::INFO),
        theme().paint(Role::Label, label),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", theme().paint(Role::Title, title));
}

pub fn dim(text: &str) -> String {
    theme().paint(Role::Label, text)
}

pub fn muted(text: &str) -> String {
    theme().paint(Role::Muted, text)
}
