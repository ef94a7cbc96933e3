// --context key=value parsing

use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Parsed `--context key=value` pairs. Later values win on repeats so
/// wrapper scripts can append overrides.
#[derive(Debug, Default)]
pub struct ContextValues {
    values: BTreeMap<String, String>,
}

impl ContextValues {
    pub fn parse(raw: &[String]) -> Result<Self> {
        let mut values = BTreeMap::new();
        for entry in raw {
            let Some((key, value)) = entry.split_once('=') else {
                bail!("invalid --context '{}': expected KEY=VALUE", entry);
            };
            if key.is_empty() {
                bail!("invalid --context '{}': empty key", entry);
            }
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_env_selection() {
        let values = ContextValues::parse(&strings(&["env=dev"])).unwrap();
        assert_eq!(values.get("env"), Some("dev"));
        assert_eq!(values.get("other"), None);
    }

    #[test]
    fn last_value_wins() {
        let values = ContextValues::parse(&strings(&["env=dev", "env=prod"])).unwrap();
        assert_eq!(values.get("env"), Some("prod"));
    }

    #[test]
    fn value_may_contain_equals() {
        let values = ContextValues::parse(&strings(&["note=a=b"])).unwrap();
        assert_eq!(values.get("note"), Some("a=b"));
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(ContextValues::parse(&strings(&["env"])).is_err());
        assert!(ContextValues::parse(&strings(&["=dev"])).is_err());
    }
}
