use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tool binary, programme type and modes are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tool.binary.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "tool.binary cannot be empty".to_string(),
        ));
    }

    if config.tool.programme_type.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tool.programme_type cannot be empty".to_string(),
        ));
    }

    if config.tool.modes.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tool.modes cannot be empty".to_string(),
        ));
    }

    Ok(())
}
