//! Configuration module
//!
//! Environment-driven configuration for the API server, the SMTP relay,
//! and the generative-AI summarizer.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
const DEFAULT_SUMMARY_MODELS: &str = "gemini-2.0-flash,gemini-1.5-flash,gemini-1.5-pro";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Upload handling
    pub max_upload_size_bytes: usize,
    /// Directory for spooled uploads. `None` uses the system temp directory.
    pub spool_dir: Option<PathBuf>,
    // Summarizer
    pub gemini_api_key: String,
    /// Ordered fallback chain, fastest/cheapest first.
    pub summary_models: Vec<String>,
    // SMTP relay
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: String,
    pub smtp_tls: bool,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?;

        let summary_models: Vec<String> = env::var("SUMMARY_MODELS")
            .unwrap_or_else(|_| DEFAULT_SUMMARY_MODELS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            spool_dir: env::var("SPOOL_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?,
            summary_models,
            smtp_host: env::var("SMTP_HOST")
                .map_err(|_| anyhow::anyhow!("SMTP_HOST must be set"))?,
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| DEFAULT_SMTP_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_PORT must be a valid number"))?,
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM")
                .map_err(|_| anyhow::anyhow!("SMTP_FROM must be set"))?,
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_TLS must be 'true' or 'false'"))?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_API_KEY cannot be empty"));
        }

        if self.summary_models.is_empty() {
            return Err(anyhow::anyhow!(
                "SUMMARY_MODELS must name at least one model"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.smtp_host.trim().is_empty() {
            return Err(anyhow::anyhow!("SMTP_HOST cannot be empty"));
        }

        if !self.smtp_from.contains('@') {
            return Err(anyhow::anyhow!(
                "SMTP_FROM must be a valid email address (got '{}')",
                self.smtp_from
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            max_upload_size_bytes: 10 * 1024 * 1024,
            spool_dir: None,
            gemini_api_key: "test-key".to_string(),
            summary_models: vec!["gemini-2.0-flash".to_string()],
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            smtp_from: "noreply@example.com".to_string(),
            smtp_tls: true,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let mut config = test_config();
        config.gemini_api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_model_list() {
        let mut config = test_config();
        config.summary_models.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_smtp_from() {
        let mut config = test_config();
        config.smtp_from = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wildcard_cors_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
    }

    /// Malformed numeric/boolean env values must fail fast, matching PORT.
    /// Single test so nothing else races on the process environment.
    #[test]
    fn test_from_env_rejects_malformed_values() {
        std::env::set_var("ENVIRONMENT", "development");
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::set_var("SMTP_FROM", "noreply@example.com");

        std::env::set_var("MAX_UPLOAD_SIZE_MB", "ten");
        assert!(Config::from_env().is_err());
        std::env::remove_var("MAX_UPLOAD_SIZE_MB");

        std::env::set_var("SMTP_PORT", "not-a-port");
        assert!(Config::from_env().is_err());
        std::env::remove_var("SMTP_PORT");

        std::env::set_var("SMTP_TLS", "maybe");
        assert!(Config::from_env().is_err());
        std::env::remove_var("SMTP_TLS");

        // With the malformed values gone, defaults apply
        let config = Config::from_env().expect("config from env");
        assert_eq!(config.max_upload_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.smtp_port, 587);
        assert!(config.smtp_tls);
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "PROD".to_string();
        assert!(config.is_production());
    }
}
