use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    load(
        File::new("configuration.yaml", FileFormat::Yaml).required(false),
        environment(),
    )
}

fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("_")
}

/// Layers `file` over the built-in defaults, then `environment` over both.
fn load<F>(file: F, environment: Environment) -> Result<Settings, ConfigError>
where
    F: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8000)?
        .add_source(file)
        .add_source(environment)
        .build()?;

    settings.try_deserialize::<Settings>()
}
