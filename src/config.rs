use crate::contact::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AddrbookConfig {
    pub database: Option<String>,
    pub order: Option<SortOrder>,
    pub dump_path: Option<String>,
}

impl AddrbookConfig {
    /// Flag value wins over the config file, which wins over the default
    pub fn resolve_database(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_database_path)
    }

    pub fn resolve_order(&self, flag: Option<SortOrder>) -> SortOrder {
        flag.or(self.order).unwrap_or_default()
    }

    pub fn resolve_dump_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.dump_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_dump_path)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("addrbook.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("address_book.db")
}

pub fn default_dump_path() -> PathBuf {
    PathBuf::from("database_dump.sql")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<AddrbookConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AddrbookConfig = toml::from_str(&contents)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AddrbookConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_config(Some(&dir.path().join("addrbook.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addrbook.toml");
        let config = AddrbookConfig {
            database: Some("contacts.db".into()),
            order: Some(SortOrder::Desc),
            dump_path: None,
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("contacts.db"));
        assert_eq!(loaded.order, Some(SortOrder::Desc));

        assert!(write_config(&path, &config, false).is_err());
        assert!(write_config(&path, &config, true).is_ok());
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addrbook.toml");
        std::fs::write(&path, "order = \"sideways\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("addrbook.toml"));
    }

    #[test]
    fn test_resolution_precedence() {
        let config = AddrbookConfig {
            database: Some("from_config.db".into()),
            order: Some(SortOrder::Desc),
            dump_path: None,
        };
        assert_eq!(config.resolve_database(None), PathBuf::from("from_config.db"));
        assert_eq!(
            config.resolve_database(Some(PathBuf::from("flag.db"))),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.resolve_order(None), SortOrder::Desc);
        assert_eq!(config.resolve_order(Some(SortOrder::Asc)), SortOrder::Asc);
        assert_eq!(config.resolve_dump_path(None), default_dump_path());
        assert_eq!(AddrbookConfig::default().resolve_database(None), default_database_path());
    }
}
