use std::env;

use chrono::Duration;

use crate::domain::entities::FieldMap;
use crate::domain::ports::TableQuery;
use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "https://api.airtable.com";
const DEFAULT_TABLE: &str = "Agents";
const DEFAULT_VIEW: &str = "Grid view";
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_PORT: u16 = 8080;
const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    /// View filter; `None` when `AIRTABLE_VIEW` is set to an empty string
    pub airtable_view: Option<String>,
    pub airtable_api_url: String,
    /// Source field names for name, category and score
    pub fields: FieldMap,
    pub cache_ttl_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env.local first so it wins over .env; neither overrides the real environment
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let defaults = FieldMap::default();

        Ok(Self {
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            airtable_table_name: or_default("AIRTABLE_TABLE_NAME", DEFAULT_TABLE),
            airtable_view: Some(or_default("AIRTABLE_VIEW", DEFAULT_VIEW))
                .filter(|v| !v.is_empty()),
            airtable_api_url: or_default("AIRTABLE_API_URL", DEFAULT_API_URL),
            fields: FieldMap {
                name: or_default("LEADERBOARD_NAME_FIELD", &defaults.name),
                category: or_default("LEADERBOARD_CATEGORY_FIELD", &defaults.category),
                score: or_default("LEADERBOARD_SCORE_FIELD", &defaults.score),
            },
            cache_ttl_secs: parse_or(&lookup, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    pub fn table_query(&self) -> TableQuery {
        TableQuery {
            base_id: self.airtable_base_id.clone(),
            table: self.airtable_table_name.clone(),
            view: self.airtable_view.clone(),
        }
    }

    /// Cache lifetime, capped at one year
    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.cache_ttl_secs.min(MAX_CACHE_TTL_SECS) as i64)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key,
            value,
        }),
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("airtable_api_key", &"<redacted>")
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table_name", &self.airtable_table_name)
            .field("airtable_view", &self.airtable_view)
            .field("airtable_api_url", &self.airtable_api_url)
            .field("fields", &self.fields)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required_only() -> Vec<(&'static str, &'static str)> {
        vec![
            ("AIRTABLE_API_KEY", "patSECRET"),
            ("AIRTABLE_BASE_ID", "appBASE"),
        ]
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(&required_only())).unwrap();

        assert_eq!(config.airtable_table_name, "Agents");
        assert_eq!(config.airtable_view.as_deref(), Some("Grid view"));
        assert_eq!(config.airtable_api_url, "https://api.airtable.com");
        assert_eq!(config.fields, FieldMap::default());
        assert_eq!(config.cache_ttl_secs, 86_400);
        assert_eq!(config.cache_ttl(), Duration::hours(24));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("AIRTABLE_BASE_ID", "appBASE")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("AIRTABLE_API_KEY"));
    }

    #[test]
    fn blank_base_id_is_missing() {
        let result = Config::from_lookup(lookup_from(&[
            ("AIRTABLE_API_KEY", "patSECRET"),
            ("AIRTABLE_BASE_ID", "  "),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("AIRTABLE_BASE_ID"));
    }

    #[test]
    fn empty_view_disables_filter() {
        let mut pairs = required_only();
        pairs.push(("AIRTABLE_VIEW", ""));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.airtable_view, None);
        assert_eq!(config.table_query().view, None);
    }

    #[test]
    fn overrides_apply() {
        let mut pairs = required_only();
        pairs.extend([
            ("AIRTABLE_TABLE_NAME", "Referrers"),
            ("LEADERBOARD_SCORE_FIELD", "Earnings"),
            ("CACHE_TTL_SECS", "60"),
            ("PORT", "3000"),
        ]);

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        let query = config.table_query();

        assert_eq!(query.base_id, "appBASE");
        assert_eq!(query.table, "Referrers");
        assert_eq!(config.fields.score, "Earnings");
        assert_eq!(config.fields.name, "Name");
        assert_eq!(config.cache_ttl(), Duration::seconds(60));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn cache_ttl_is_capped() {
        let mut pairs = required_only();
        pairs.push(("CACHE_TTL_SECS", "18446744073709551615"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.cache_ttl(), Duration::days(365));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut pairs = required_only();
        pairs.push(("PORT", "eighty"));

        let result = Config::from_lookup(lookup_from(&pairs));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                var: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&required_only())).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("patSECRET"));
        assert!(debug.contains("<redacted>"));
    }
}
