//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 40;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_format(&config.engine.format)?;
    validate_user_agent(&config.engine.user_agent)?;

    if let Some(path) = &config.engine.ytdlp_path {
        if !path.is_file() {
            return Err(Error::ConfigValidation {
                field: "ytdlp_path".to_string(),
                message: format!("No yt-dlp binary at {}", path.display()),
            });
        }
    }

    Ok(())
}

/// Validate the yt-dlp format selector.
pub fn validate_format(format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(Error::MissingConfig("format".to_string()));
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    // Check for placeholder values
    let ua_lower = user_agent.to_lowercase();
    if ua_lower.contains("replaceme") || ua_lower.contains("your_user_agent") {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message:
                "User agent appears to be a placeholder. Please provide a browser user agent."
                    .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_format() {
        assert!(matches!(
            validate_format("  ").unwrap_err(),
            Error::MissingConfig(_)
        ));
    }

    #[test]
    fn test_user_agent_too_short() {
        assert!(validate_user_agent("curl/8.0").is_err());
        assert!(validate_user_agent("").is_err());
    }

    #[test]
    fn test_user_agent_placeholder() {
        let ua = "REPLACEME REPLACEME REPLACEME REPLACEME REPLACEME";
        assert!(validate_user_agent(ua).is_err());
    }

    #[test]
    fn test_missing_ytdlp_path() {
        let mut config = Config::default();
        config.engine.ytdlp_path = Some(PathBuf::from("/definitely/not/here/yt-dlp"));
        assert!(matches!(
            validate_config(&config).unwrap_err(),
            Error::ConfigValidation { ref field, .. } if field == "ytdlp_path"
        ));
    }
}
