//! Environment-based configuration loading.
//!
//! Reads the process environment once at startup into an [`AppConfig`]
//! that gets passed down explicitly; components never consult the
//! environment themselves. Missing API keys are left as `None` so their
//! absence surfaces as a provider auth error at call time, not as an
//! eager startup failure.

use weft_types::config::{AppConfig, PgSettings};

/// Load configuration from the process environment.
pub fn load() -> AppConfig {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build an [`AppConfig`] from any variable lookup (injectable for tests).
fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let defaults = AppConfig::default();
    let pg_defaults = PgSettings::default();

    AppConfig {
        chat_model: lookup("WEFT_CHAT_MODEL").unwrap_or(defaults.chat_model),
        embedding_model: lookup("WEFT_EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
        max_output_tokens: lookup("WEFT_MAX_OUTPUT_TOKENS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_output_tokens),
        gemini_api_key: lookup("GEMINI_API_KEY").filter(|v| !v.is_empty()),
        tavily_api_key: lookup("TAVILY_API_KEY").filter(|v| !v.is_empty()),
        otel_enabled: lookup("WEFT_TRACE_OTEL")
            .map(|v| is_truthy(&v))
            .unwrap_or(false),
        postgres: PgSettings {
            host: lookup("WEFT_PG_HOST").unwrap_or(pg_defaults.host),
            port: lookup("WEFT_PG_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(pg_defaults.port),
            user: lookup("WEFT_PG_USER").unwrap_or(pg_defaults.user),
            password: lookup("WEFT_PG_PASSWORD").unwrap_or(pg_defaults.password),
            database: lookup("WEFT_PG_DATABASE").unwrap_or(pg_defaults.database),
        },
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = from_lookup(|_| None);
        assert_eq!(config.chat_model, "gemini-2.0-flash");
        assert_eq!(config.max_output_tokens, 2048);
        assert!(config.gemini_api_key.is_none());
        assert!(!config.otel_enabled);
        assert_eq!(config.postgres.host, "127.0.0.1");
        assert_eq!(config.postgres.port, 5432);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = from_lookup(lookup_from(&[
            ("WEFT_CHAT_MODEL", "gemini-2.5-pro"),
            ("WEFT_MAX_OUTPUT_TOKENS", "4096"),
            ("GEMINI_API_KEY", "key-123"),
            ("WEFT_TRACE_OTEL", "true"),
            ("WEFT_PG_HOST", "db.internal"),
            ("WEFT_PG_PORT", "5433"),
        ]));

        assert_eq!(config.chat_model, "gemini-2.5-pro");
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.gemini_api_key.as_deref(), Some("key-123"));
        assert!(config.otel_enabled);
        assert_eq!(config.postgres.host, "db.internal");
        assert_eq!(config.postgres.port, 5433);
    }

    #[test]
    fn test_blank_api_key_treated_as_absent() {
        let config = from_lookup(lookup_from(&[("GEMINI_API_KEY", "")]));
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = from_lookup(lookup_from(&[
            ("WEFT_MAX_OUTPUT_TOKENS", "lots"),
            ("WEFT_PG_PORT", "not-a-port"),
        ]));
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.postgres.port, 5432);
    }

    #[test]
    fn test_truthy_values() {
        for v in ["1", "true", "TRUE", "yes", "on"] {
            assert!(is_truthy(v), "{v} should be truthy");
        }
        for v in ["0", "false", "off", ""] {
            assert!(!is_truthy(v), "{v} should be falsy");
        }
    }
}
