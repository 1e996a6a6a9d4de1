use crate::domain::WaitlistEmail;
use crate::email_client::EmailClient;
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub notifications: NotificationSettings,
    pub cors: CorsSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub environment: Environment,
    /// Directory holding the landing page. Nothing is served when unset.
    pub static_dir: Option<PathBuf>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self, sender: String) -> Result<EmailClient, reqwest::Error> {
        EmailClient::new(
            self.base_url.clone(),
            sender,
            self.authorization_token.clone(),
            self.timeout(),
        )
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    /// `From` header of every outgoing email, display name included.
    pub sender: String,
    pub admin_email: String,
}

impl NotificationSettings {
    pub fn admin_recipient(&self) -> Result<WaitlistEmail, String> {
        WaitlistEmail::parse(&self.admin_email)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    /// Only honoured in the development environment.
    pub allow_any_origin_in_development: bool,
}

/// The possible runtime environment for our application.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    /// Error payloads carry internal details only while developing.
    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "test" | "ci" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `development`, `test` or `production`.",
                other
            )),
        }
    }
}

const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://your-domain.com",
    "https://www.your-domain.com",
    "https://d-bac-tea.com",
    "https://www.d-bac-tea.com",
];

/// Reads the configuration from `./configuration` and the process environment.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");
    load_configuration(&configuration_directory, |key| std::env::var(key).ok())
}

/// Builds `Settings` from, lowest precedence first: built-in defaults,
/// `base.yaml`, `<environment>.yaml`, `APP_`-prefixed variables and the
/// conventional plain variables (`RESEND_API_KEY`, `ADMIN_EMAIL`, `PORT`).
///
/// Environment lookups go through `lookup` so tests never touch the
/// process environment.
pub fn load_configuration(
    configuration_directory: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    // `ADMIN_EMAIL=` in a `.env` file means "use the default".
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let environment: Environment = lookup("APP_ENVIRONMENT")
        .or_else(|| lookup("NODE_ENV"))
        .unwrap_or_else(|| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let prefixed = config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .source(Some(prefixed_variables(&lookup)));

    let settings = Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 3000)?
        .set_default("email_client.base_url", "https://api.resend.com")?
        .set_default("email_client.authorization_token", "")?
        .set_default("email_client.timeout_milliseconds", 10_000)?
        .set_default("notifications.sender", "D-Bac AI Tea <noreply@d-bac-tea.com>")?
        .set_default("notifications.admin_email", "admin@d-bac-tea.com")?
        .set_default("cors.allowed_origins", DEFAULT_ALLOWED_ORIGINS.to_vec())?
        .set_default("cors.allow_any_origin_in_development", false)?
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(File::from(configuration_directory.join(environment_filename)).required(false))
        .add_source(prefixed)
        .set_override("application.environment", environment.as_str())?
        .set_override_option("email_client.authorization_token", lookup("RESEND_API_KEY"))?
        .set_override_option("notifications.admin_email", lookup("ADMIN_EMAIL"))?
        .set_override_option("application.port", lookup("PORT"))?
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    if settings
        .email_client
        .authorization_token
        .expose_secret()
        .trim()
        .is_empty()
    {
        return Err(ConfigError::Message(
            "RESEND_API_KEY is required but not set".into(),
        ));
    }
    Ok(settings)
}

fn prefixed_variables(
    lookup: &impl Fn(&str) -> Option<String>,
) -> config::Map<String, String> {
    // `config::Environment` scans a map we hand it; only the keys we know
    // about are forwarded so the lookup stays the single source of truth.
    const KEYS: [&str; 8] = [
        "APP_APPLICATION__HOST",
        "APP_APPLICATION__PORT",
        "APP_APPLICATION__STATIC_DIR",
        "APP_EMAIL_CLIENT__BASE_URL",
        "APP_EMAIL_CLIENT__TIMEOUT_MILLISECONDS",
        "APP_NOTIFICATIONS__SENDER",
        "APP_NOTIFICATIONS__ADMIN_EMAIL",
        "APP_CORS__ALLOW_ANY_ORIGIN_IN_DEVELOPMENT",
    ];
    KEYS.into_iter()
        .filter_map(|key| lookup(key).map(|value| (key.to_string(), value)))
        .collect()
}
