use config::{Config, ConfigBuilder, ConfigError, File, builder::DefaultState};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub fn get_configuration() -> Result<Configuration, ConfigError> {
    dotenvy::dotenv().ok();

    let base_path = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    let configuration_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or("local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    // this would set APP_{Configuration}__{Field}
    let builder = Config::builder()
        .add_source(File::from(configuration_dir.join("base.json")))
        .add_source(File::from(
            configuration_dir.join(format!("{}.json", environment.as_str())),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    with_legacy_overrides(builder)?
        .build()?
        .try_deserialize::<Configuration>()
}

/// Variable names the landing page was originally deployed with.
/// An empty value counts as unset.
const LEGACY_VARIABLES: [(&str, &str); 4] = [
    ("PROJECT_SLUG", "signup.project_slug"),
    ("IDEA_ID", "signup.idea_id"),
    ("DASHBOARD_URL", "collector.base_url"),
    ("DASHBOARD_API_KEY", "collector.api_key"),
];

fn with_legacy_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (variable, key) in LEGACY_VARIABLES {
        let value = std::env::var(variable).ok().filter(|v| !v.is_empty());
        builder = builder.set_override_option(key, value)?;
    }
    Ok(builder)
}

pub type Port = u16;

#[derive(Deserialize, Debug, Clone)]
pub struct Configuration {
    pub application: ApplicationConfiguration,
    pub signup: SignupConfiguration,
    pub collector: CollectorConfiguration,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationConfiguration {
    pub port: Port,
    pub host: String,
}

/// Tenant tags attached to every forwarded signup.
#[derive(Deserialize, Debug, Clone)]
pub struct SignupConfiguration {
    pub project_slug: String,
    #[serde(default)]
    pub idea_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CollectorConfiguration {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "empty_secret")]
    pub api_key: SecretString,
    pub timeout_ms: u64,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

impl CollectorConfiguration {
    /// The relay only runs when both the url and the api key are present.
    pub fn is_enabled(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.expose_secret().is_empty()
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
