//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use super::secret::secret_string;
use crate::domain::errors::EhrError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (EHRLINK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`EhrError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ehrlink::config::loader::load_config;
///
/// let config = load_config("ehrlink.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EhrError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EhrError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| EhrError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        EhrError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EhrError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
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
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
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
        return Err(EhrError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the EHRLINK_* prefix
///
/// Variables follow the pattern `EHRLINK_<SECTION>_<KEY>`, for example
/// `EHRLINK_EPIC_BASE_URL`. Provider overrides only apply to sections that
/// are present in the file.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(val) = std::env::var("EHRLINK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("EHRLINK_APPLICATION_ACTIVE_PROVIDER") {
        config.application.active_provider = val.parse().map_err(EhrError::Configuration)?;
    }

    if let Ok(val) = std::env::var("EHRLINK_HTTP_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.http.timeout_seconds = timeout;
        }
    }

    if let Some(ref mut drchrono) = config.drchrono {
        if let Ok(val) = std::env::var("EHRLINK_DRCHRONO_BASE_URL") {
            drchrono.base_url = val;
        }
        if let Ok(val) = std::env::var("EHRLINK_DRCHRONO_TOKEN_URL") {
            drchrono.token_url = val;
        }
        if let Ok(val) = std::env::var("EHRLINK_DRCHRONO_CLIENT_ID") {
            drchrono.client_id = val;
        }
        if let Ok(val) = std::env::var("EHRLINK_DRCHRONO_CLIENT_SECRET") {
            drchrono.client_secret = secret_string(val);
        }
    }

    if let Some(ref mut epic) = config.epic {
        if let Ok(val) = std::env::var("EHRLINK_EPIC_BASE_URL") {
            epic.base_url = val;
        }
        if let Ok(val) = std::env::var("EHRLINK_EPIC_USERNAME") {
            epic.username = val;
        }
        if let Ok(val) = std::env::var("EHRLINK_EPIC_PASSWORD") {
            epic.password = secret_string(val);
        }
    }

    if let Ok(val) = std::env::var("EHRLINK_LOGGING_FORMAT") {
        config.logging.format = val;
    }
    if let Ok(val) = std::env::var("EHRLINK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("EHRLINK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("EHRLINK_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${EHRLINK_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("EHRLINK_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("EHRLINK_LOADER_MISSING_VAR");
        let input = "password = \"${EHRLINK_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("EHRLINK_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("EHRLINK_LOADER_COMMENTED_VAR");
        let input = "# password = \"${EHRLINK_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(EhrError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"
active_provider = "epic"

[epic]
base_url = "https://fhir.example.org/api/FHIR/R4/"
username = "fhiruser"
password = "fhirpass"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config.application.active_provider,
            crate::domain::ProviderKind::Epic
        );
        assert!(config.drchrono.is_none());
        assert_eq!(config.http.timeout_seconds, 30);
    }
}
