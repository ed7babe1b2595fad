use crate::config::Config;

pub const WRITER_API_URL: &str = "WRITER_API_URL";
pub const WRITER_API_KEY: &str = "WRITER_API_KEY";
pub const TABLE_APP_ID: &str = "TABLE_APP_ID";
pub const TABLE_APP_SECRET: &str = "TABLE_APP_SECRET";
pub const TABLE_APP_TOKEN: &str = "TABLE_APP_TOKEN";
pub const TABLE_ID: &str = "TABLE_ID";

impl Config {
    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(WRITER_API_URL) {
            self.forward.url = Some(v);
        }
        if let Some(v) = get(WRITER_API_KEY) {
            self.forward.api_key = Some(v);
        }
        if let Some(v) = get(TABLE_APP_ID) {
            self.table.app_id = Some(v);
        }
        if let Some(v) = get(TABLE_APP_SECRET) {
            self.table.app_secret = Some(v);
        }
        if let Some(v) = get(TABLE_APP_TOKEN) {
            self.table.app_token = Some(v);
        }
        if let Some(v) = get(TABLE_ID) {
            self.table.table_id = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_replace_config_values() {
        let vars: HashMap<&str, &str> = [
            (WRITER_API_URL, "https://writer.example/ingest"),
            (WRITER_API_KEY, "k"),
            (TABLE_APP_ID, "app"),
            (TABLE_ID, "tbl"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.forward.url = Some("https://old.example".into());
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.forward.url.as_deref(), Some("https://writer.example/ingest"));
        assert_eq!(config.forward.api_key.as_deref(), Some("k"));
        assert_eq!(config.table.app_id.as_deref(), Some("app"));
        assert_eq!(config.table.table_id.as_deref(), Some("tbl"));
        assert!(config.table.app_secret.is_none());
    }

    #[test]
    fn test_empty_values_ignored() {
        let mut config = Config::default();
        config.forward.url = Some("https://kept.example".into());
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.forward.url.as_deref(), Some("https://kept.example"));
    }
}
