pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, dim, error, header, info, muted, section, status, success, warn};
pub use table::{contacts_table, stats_table, TableBuilder};
pub use theme::{theme, Role, Theme};
