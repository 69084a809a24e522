//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `speech`: synthesis engine selection and tuning
//! - `music`: background playlist

mod music;
mod server;
mod speech;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use music::MusicConfig;
pub use server::ServerConfig;
pub use speech::{CommandEngineConfig, EngineKind, SimulatedEngineConfig, SpeechConfig};

/// Prefix for environment overrides, e.g. `VOXQUEUE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "VOXQUEUE";

/// Error type for configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or deserialize a source
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values are present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Speech engine configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Background music configuration
    #[serde(default)]
    pub music: MusicConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config::File::with_name("config").required(false))
    }

    /// Load configuration layering the given source between the defaults and
    /// the environment
    pub fn load_from<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8765)?
            .add_source(source)
            // Override with environment variables (e.g., VOXQUEUE_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("music.playlist")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.speech.engine == EngineKind::Command
            && self.speech.command.program.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "speech.command.program must be set for the command engine".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.music.volume) {
            return Err(ConfigError::Invalid(format!(
                "music.volume must be within [0, 1], got {}",
                self.music.volume
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};

    use super::*;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::load_from(File::from_str(toml, FileFormat::Toml))
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8765);
        assert_eq!(config.speech.engine, EngineKind::Simulated);
        assert!(config.music.playlist.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.speech, SpeechConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9100
            log_format = "json"

            [speech]
            engine = "command"

            [speech.command]
            program = "say"
            args = ["-r", "{rate}", "{text}"]

            [music]
            playlist = ["a.mp3", "b.ogg"]
            volume = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert!(config.server.json_logs());
        assert_eq!(config.speech.engine, EngineKind::Command);
        assert_eq!(config.speech.command.program, "say");
        assert_eq!(config.speech.command.args.len(), 3);
        assert_eq!(config.speech.command.base_rate, 175);
        assert_eq!(config.music.playlist, vec!["a.mp3", "b.ogg"]);
    }

    #[test]
    fn port_zero_is_rejected() {
        let result = from_toml("[server]\nport = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_command_program_is_rejected() {
        let mut config = AppConfig::default();
        config.speech.engine = EngineKind::Command;
        config.speech.command.program = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.speech.engine = EngineKind::Simulated;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn volume_out_of_range_is_rejected() {
        let mut config = AppConfig::default();
        config.music.volume = 1.5;
        assert!(config.validate().is_err());
        config.music.volume = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn engine_kind_serialize() {
        assert_eq!(
            serde_json::to_string(&EngineKind::Command).unwrap(),
            "\"command\""
        );
        assert_eq!(EngineKind::Simulated.to_string(), "simulated");
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(server.bind_address(), "127.0.0.1:9000");
    }
}
