//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RecetaConfig;
use crate::domain::errors::RecetaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RecetaConfig
/// 4. Applies environment variable overrides (RECETA_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use receta::config::loader::load_config;
///
/// let config = load_config("receta.toml").expect("Failed to load config");
/// println!("Submitting to {}", config.api.endpoint_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RecetaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RecetaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RecetaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RecetaConfig = toml::from_str(&contents)
        .map_err(|e| RecetaError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RecetaError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim. Every missing variable is reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_regex();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RecetaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using RECETA_* prefix
///
/// Environment variables follow the pattern: RECETA_<SECTION>_<KEY>
/// For example: RECETA_API_ENDPOINT_URL, RECETA_PROXY_LISTEN_ADDR
///
/// # Errors
///
/// Returns an error if a numeric or boolean override cannot be parsed
fn apply_env_overrides(config: &mut RecetaConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RECETA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("RECETA_API_ENDPOINT_URL") {
        config.api.endpoint_url = val;
    }
    if let Ok(val) = std::env::var("RECETA_API_CLIENT_APP_ID") {
        config.api.client_app_id = parse_override("RECETA_API_CLIENT_APP_ID", &val)?;
    }
    if let Ok(val) = std::env::var("RECETA_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = Some(parse_override("RECETA_API_TIMEOUT_SECONDS", &val)?);
    }

    // Proxy overrides
    if let Ok(val) = std::env::var("RECETA_PROXY_LISTEN_ADDR") {
        config.proxy.listen_addr = val;
    }
    if let Ok(val) = std::env::var("RECETA_PROXY_UPSTREAM_URL") {
        config.proxy.upstream_url = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RECETA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("RECETA_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("RECETA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RECETA_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        RecetaError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("RECETA_LOADER_TEST_VAR", "test_value");
        let input = "endpoint_url = \"${RECETA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "endpoint_url = \"test_value\"\n");
        std::env::remove_var("RECETA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing_lists_all() {
        std::env::remove_var("RECETA_LOADER_MISSING_A");
        std::env::remove_var("RECETA_LOADER_MISSING_B");
        let input = "a = \"${RECETA_LOADER_MISSING_A}\"\nb = \"${RECETA_LOADER_MISSING_B}\"";

        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("RECETA_LOADER_MISSING_A"));
        assert!(err.contains("RECETA_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("RECETA_LOADER_COMMENTED");
        let input = "# endpoint_url = \"${RECETA_LOADER_COMMENTED}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${RECETA_LOADER_COMMENTED}"));
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override::<i64>("X", " 42 ").unwrap(), 42);
        assert!(parse_override::<bool>("X", "yes").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
endpoint_url = "https://apirecipe.hml.qbitos.com/apirecipe/Receta"
client_app_id = 12
timeout_seconds = 20

[proxy]
listen_addr = "0.0.0.0:8080"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.client_app_id, 12);
        assert_eq!(config.api.timeout_seconds, Some(20));
        assert_eq!(config.proxy.listen_addr, "0.0.0.0:8080");
    }
}
