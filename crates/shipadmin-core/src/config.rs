use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let wp_origin = require("WP_ORIGIN")?.trim_end_matches('/').to_string();
    if wp_origin.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "WP_ORIGIN".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("SHIPADMIN_ENV", "development"))?;
    let bind_addr = parse_addr("SHIPADMIN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHIPADMIN_LOG_LEVEL", "info");

    let wp_user = lookup("WP_USER").ok();
    // WP_APP_PASSWORD is the legacy variable name; WP_APP_PASS wins when both are set.
    let wp_app_pass = lookup("WP_APP_PASS").or_else(|_| lookup("WP_APP_PASSWORD")).ok();

    let wp_timeout_secs = parse_u64("SHIPADMIN_WP_TIMEOUT_SECS", "30")?;
    let wp_search_enabled = parse_bool("SHIPADMIN_WP_SEARCH", "true")?;
    let default_per_page = parse_u32("SHIPADMIN_DEFAULT_PER_PAGE", "20")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        wp_origin,
        wp_user,
        wp_app_pass,
        wp_timeout_secs,
        wp_search_enabled,
        default_per_page,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHIPADMIN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("WP_ORIGIN", "https://shop.example.com");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHIPADMIN_ENV"));
    }

    #[test]
    fn build_app_config_fails_without_wp_origin() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "WP_ORIGIN"),
            "expected MissingEnvVar(WP_ORIGIN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_strips_trailing_slash_from_origin() {
        let mut map = full_env();
        map.insert("WP_ORIGIN", "https://shop.example.com/");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.wp_origin, "https://shop.example.com");
    }

    #[test]
    fn build_app_config_applies_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.wp_timeout_secs, 30);
        assert!(cfg.wp_search_enabled);
        assert_eq!(cfg.default_per_page, 20);
        assert!(cfg.wp_user.is_none());
        assert!(cfg.wp_app_pass.is_none());
    }

    #[test]
    fn build_app_config_reads_credentials() {
        let mut map = full_env();
        map.insert("WP_USER", "admin");
        map.insert("WP_APP_PASS", "s3cret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.wp_user.as_deref(), Some("admin"));
        assert_eq!(cfg.wp_app_pass.as_deref(), Some("s3cret"));
    }

    #[test]
    fn build_app_config_falls_back_to_legacy_password_var() {
        let mut map = full_env();
        map.insert("WP_USER", "admin");
        map.insert("WP_APP_PASSWORD", "legacy-pass");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.wp_app_pass.as_deref(), Some("legacy-pass"));
    }

    #[test]
    fn build_app_config_prefers_current_password_var() {
        let mut map = full_env();
        map.insert("WP_APP_PASS", "current");
        map.insert("WP_APP_PASSWORD", "legacy");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.wp_app_pass.as_deref(), Some("current"));
    }

    #[test]
    fn build_app_config_invalid_bool_fails() {
        let mut map = full_env();
        map.insert("SHIPADMIN_WP_SEARCH", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIPADMIN_WP_SEARCH"),
            "expected InvalidEnvVar(SHIPADMIN_WP_SEARCH), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_invalid_per_page_fails() {
        let mut map = full_env();
        map.insert("SHIPADMIN_DEFAULT_PER_PAGE", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIPADMIN_DEFAULT_PER_PAGE"),
            "expected InvalidEnvVar(SHIPADMIN_DEFAULT_PER_PAGE), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_app_password() {
        let mut map = full_env();
        map.insert("WP_USER", "admin");
        map.insert("WP_APP_PASS", "s3cret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("s3cret"), "debug output leaked credential: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
