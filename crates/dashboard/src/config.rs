use std::env;

use defi_dashboard_core::models::settings::Settings;

/// Dashboard configuration derived from environment variables.
///
/// Unset, empty, or unparsable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub bind: String,
    pub port: u16,
    /// Per-request timeout for provider calls.
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8501,
            request_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            bind: get("DASHBOARD_BIND").unwrap_or(defaults.bind),
            port: get("DASHBOARD_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: get("DASHBOARD_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Core settings with this config's overrides applied.
    pub fn settings(&self) -> Settings {
        Settings {
            request_timeout_secs: self.request_timeout_secs,
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            ("DASHBOARD_BIND", " 0.0.0.0 "),
            ("DASHBOARD_PORT", "9000"),
            ("DASHBOARD_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(cfg.bind, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.settings().request_timeout_secs, 5);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            ("DASHBOARD_BIND", ""),
            ("DASHBOARD_PORT", "not-a-port"),
            ("DASHBOARD_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg, DashboardConfig::default());
    }
}
