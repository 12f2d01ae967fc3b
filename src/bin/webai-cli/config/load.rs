use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
}

pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    fs::create_dir_all(&paths.logs_dir)?;
    let config = read_config(&paths.config_file)?;
    Ok(LoadedConfig { config, paths })
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(err) => Err(ConfigError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = read_config(&dir.path().join("config.toml")).expect("read");
        assert!(config.speak);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.initial_delay_ms, 2_000);
        assert_eq!(config.speech.command, "espeak");
        assert_eq!(config.speech.voice.speed, 175);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
model = "meta-llama/Llama-3.2-3B-Instruct"
speak = false

[retry]
max_retries = 5

[speech]
command = "espeak-ng"
pitch = 40

[import]
relay_prefix = "https://corsproxy.io/?url="
"#,
        )
        .expect("write");

        let config = read_config(&path).expect("read");
        assert_eq!(
            config.model.as_deref(),
            Some("meta-llama/Llama-3.2-3B-Instruct")
        );
        assert!(!config.speak);
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.backoff_multiplier, 2);
        assert_eq!(config.speech.command, "espeak-ng");
        assert_eq!(config.speech.voice.pitch, 40);
        assert_eq!(config.speech.voice.amplitude, 100);
        assert_eq!(
            config.import.relay_prefix.as_deref(),
            Some("https://corsproxy.io/?url=")
        );
        assert_eq!(config.import.paste_base_url, "https://pastebin.com/raw/");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "speak = maybe").expect("write");
        assert!(matches!(read_config(&path), Err(ConfigError::Toml(_))));
    }
}
