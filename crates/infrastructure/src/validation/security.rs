//! Startup validation for application configuration
//!
//! Reports missing credentials and risky settings at startup. Critical
//! issues in production prevent startup unless explicitly allowed.

use std::fmt;

use ai_core::WeatherModelMode;

use crate::config::AppConfig;

/// Environment variable that lets production start despite critical issues
pub const ALLOW_INSECURE_ENV: &str = "FLOODWATCH_ALLOW_INSECURE_CONFIG";

/// Severity level for configuration warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - should be addressed but not critical
    Warning,
    /// Critical - must be addressed in production
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A configuration warning with severity and description
#[derive(Debug, Clone)]
pub struct SecurityWarning {
    /// Severity level of the warning
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl SecurityWarning {
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Check if this warning is critical
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for SecurityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration before the server starts
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityValidator;

impl SecurityValidator {
    /// Validate configuration and return all warnings, critical first
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();
        let is_production = config.environment.is_production();

        Self::check_cors_configuration(config, is_production, &mut warnings);
        Self::check_required_secrets(config, is_production, &mut warnings);
        Self::check_storage(config, &mut warnings);
        Self::check_models(config, &mut warnings);

        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        warnings
    }

    /// Check if startup should be blocked due to critical issues
    ///
    /// Returns `true` if the server should refuse to start.
    #[must_use]
    pub fn should_block_startup(config: &AppConfig, warnings: &[SecurityWarning]) -> bool {
        let allow_insecure = std::env::var(ALLOW_INSECURE_ENV)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self::blocks_startup(config, warnings, allow_insecure)
    }

    fn blocks_startup(
        config: &AppConfig,
        warnings: &[SecurityWarning],
        allow_insecure: bool,
    ) -> bool {
        let has_critical = warnings.iter().any(SecurityWarning::is_critical);
        config.environment.is_production() && has_critical && !allow_insecure
    }

    /// Log all warnings using tracing
    pub fn log_warnings(warnings: &[SecurityWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration issue"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration notice"
                    );
                },
            }
        }
    }

    fn check_cors_configuration(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        if config.server.allowed_origins.is_empty() {
            let severity = if is_production {
                WarningSeverity::Warning
            } else {
                WarningSeverity::Info
            };

            warnings.push(SecurityWarning::new(
                severity,
                "CFG001",
                "CORS allows all origins",
                "Set server.allowed_origins to the web front-end origins",
            ));
        }
    }

    fn check_required_secrets(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        let severity = if is_production {
            WarningSeverity::Critical
        } else {
            WarningSeverity::Warning
        };

        if config.weather.api_key.is_none() {
            warnings.push(SecurityWarning::new(
                severity,
                "CFG002",
                "Weatherbit API key is not configured, flood predictions will fail",
                "Set FLOODWATCH__WEATHER__API_KEY",
            ));
        }

        if config.email.auth_key.is_none() {
            warnings.push(SecurityWarning::new(
                severity,
                "CFG003",
                "MSG91 auth key is not configured, email sending will fail",
                "Set FLOODWATCH__EMAIL__AUTH_KEY",
            ));
        }
    }

    fn check_storage(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if config.storage.bucket.is_none() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "CFG004",
                "No reference image bucket configured",
                "Set storage.bucket to enable /api/v1/get-latest-s3-image",
            ));
        } else if !config.storage.has_credentials() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Info,
                "CFG005",
                "Bucket credentials not configured, falling back to AWS environment variables",
                "Set storage.access_key and storage.secret_key or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY",
            ));
        }
    }

    fn check_models(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if config.models.weather_mode == WeatherModelMode::Remote
            && !config.models.scaler_path.exists()
        {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "CFG006",
                format!(
                    "Scaler artifact {} does not exist, models will not load",
                    config.models.scaler_path.display()
                ),
                "Point models.scaler_path at the exported scaler JSON",
            ));
        }
    }
}
