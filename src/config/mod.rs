use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "traffic-dump";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub dump: DumpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
}

/// Raw dump settings as they appear in config files and the environment.
///
/// `catch_exceptions` is kept as text: only the exact value `"true"` enables it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpSettings {
    pub name: Option<String>,
    pub character_encoding: Option<String>,
    pub catch_exceptions: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| "config/default.yaml".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(&config_path))
            .add_source(config::Environment::with_prefix("TRAFFIC_DUMP").separator("__"));

        // Override with environment variables if present
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port.parse::<u16>()?)?;
        }

        let settings = builder.build()?;
        let config: AppConfig = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn interceptor(&self) -> InterceptorConfig {
        InterceptorConfig::from(&self.dump)
    }
}

/// Settings of one interceptor, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorConfig {
    name: String,
    character_encoding: Option<String>,
    catch_exceptions: bool,
}

impl InterceptorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character_encoding: None,
            catch_exceptions: false,
        }
    }

    pub fn with_character_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.character_encoding = non_empty(encoding.into());
        self
    }

    pub fn with_catch_exceptions(mut self, catch: bool) -> Self {
        self.catch_exceptions = catch;
        self
    }

    /// Builds a config from init parameters.
    ///
    /// Recognises `characterEncoding` and `catchExceptions`; any other key is
    /// ignored.
    pub fn from_init_params<I, K, V>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new(name);
        for (key, value) in params {
            let value: String = value.into();
            match key.as_ref() {
                "characterEncoding" => config.character_encoding = non_empty(value),
                "catchExceptions" => config.catch_exceptions = value == "true",
                _ => {}
            }
        }
        config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn character_encoding(&self) -> Option<&str> {
        self.character_encoding.as_deref()
    }

    pub fn catch_exceptions(&self) -> bool {
        self.catch_exceptions
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl From<&DumpSettings> for InterceptorConfig {
    fn from(settings: &DumpSettings) -> Self {
        let name = settings
            .name
            .clone()
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        Self {
            name,
            character_encoding: settings.character_encoding.clone().and_then(non_empty),
            catch_exceptions: settings.catch_exceptions.as_deref() == Some("true"),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_params_recognise_known_keys() {
        let config = InterceptorConfig::from_init_params(
            "api",
            [
                ("characterEncoding", "UTF-8"),
                ("catchExceptions", "true"),
                ("somethingElse", "ignored"),
            ],
        );

        assert_eq!(config.name(), "api");
        assert_eq!(config.character_encoding(), Some("UTF-8"));
        assert!(config.catch_exceptions());
    }

    #[test]
    fn catch_exceptions_needs_exact_true() {
        for value in ["TRUE", "yes", "1", " true", ""] {
            let config = InterceptorConfig::from_init_params("api", [("catchExceptions", value)]);
            assert!(!config.catch_exceptions(), "{:?} must not enable it", value);
        }
        let absent = InterceptorConfig::from_init_params("api", Vec::<(String, String)>::new());
        assert!(!absent.catch_exceptions());
    }

    #[test]
    fn blank_encoding_counts_as_unset() {
        let config = InterceptorConfig::from_init_params("api", [("characterEncoding", "  ")]);
        assert_eq!(config.character_encoding(), None);
        assert_eq!(InterceptorConfig::new("x").with_character_encoding("").character_encoding(), None);
    }

    #[test]
    fn settings_convert_with_defaults() {
        let config = InterceptorConfig::from(&DumpSettings::default());
        assert_eq!(config, InterceptorConfig::default());
        assert_eq!(config.name(), DEFAULT_NAME);

        let config = InterceptorConfig::from(&DumpSettings {
            name: Some("edge".to_string()),
            character_encoding: Some("ISO-8859-1".to_string()),
            catch_exceptions: Some("true".to_string()),
        });
        assert_eq!(config.name(), "edge");
        assert_eq!(config.character_encoding(), Some("ISO-8859-1"));
        assert!(config.catch_exceptions());
    }
}
