use crate::cli::Cli;
use libpreserve::DEFAULT_CLEAR_INTERVAL;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, num::NonZeroU32, path::Path, path::PathBuf, time::Duration};
use tracing::Level;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub window: Option<Window>,
    pub animation: Option<Animation>,
    pub log: Option<Log>,
}

impl Config {
    pub fn load(path: &Path) -> Option<Config> {
        let mut config_file = File::open(path).ok()?;
        let mut config_str = String::new();
        config_file.read_to_string(&mut config_str).ok()?;

        toml::from_str(&config_str).ok()
    }

    /// `$XDG_CONFIG_HOME/preserve-egl/config.toml`, if a config directory
    /// exists at all.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_local_dir().map(|dir| dir.join("preserve-egl").join("config.toml"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Window {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            width: Some(1920),
            height: Some(1080),
            title: Some("EGL buffer preserve".to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Animation {
    pub clear_interval: Option<u32>,
    pub frame_delay_ms: Option<u64>,
}

impl Default for Animation {
    fn default() -> Self {
        Animation {
            clear_interval: Some(DEFAULT_CLEAR_INTERVAL.get()),
            frame_delay_ms: Some(50),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Some("info".to_string()),
        }
    }
}

impl Log {
    pub fn get_level(self) -> Level {
        self.level
            .map_or(Level::INFO, |level| match level.as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            })
    }
}

/// Expands `~` and environment variables in a user supplied path.
pub fn get_expanded_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    match shellexpand::full(&path_str) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

/// Everything the demo needs to start, after CLI flags have been laid over
/// the config file and the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub clear_interval: NonZeroU32,
    pub frame_delay: Duration,
    pub log_level: Level,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let window = config.window.unwrap_or_default();
        let animation = config.animation.unwrap_or_default();
        let log = config.log.unwrap_or_default();
        let window_defaults = Window::default();
        let animation_defaults = Animation::default();

        let positive = |value: Option<i32>| value.filter(|value| *value > 0);

        let width = positive(cli.width)
            .or(positive(window.width))
            .or(window_defaults.width)
            .unwrap_or(1920);
        let height = positive(cli.height)
            .or(positive(window.height))
            .or(window_defaults.height)
            .unwrap_or(1080);
        let title = window.title.or(window_defaults.title).unwrap_or_default();

        let clear_interval = cli
            .clear_interval
            .or(animation.clear_interval)
            .and_then(NonZeroU32::new)
            .unwrap_or(DEFAULT_CLEAR_INTERVAL);
        let frame_delay_ms = cli
            .frame_delay
            .or(animation.frame_delay_ms)
            .or(animation_defaults.frame_delay_ms)
            .unwrap_or(50);

        let log_level = cli.log_level.unwrap_or_else(|| log.get_level());

        Settings {
            width,
            height,
            title,
            clear_interval,
            frame_delay: Duration::from_millis(frame_delay_ms),
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_config() {
        let settings = Settings::resolve(&Cli::default(), Config::default());
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1080);
        assert_eq!(settings.clear_interval.get(), 20);
        assert_eq!(settings.frame_delay, Duration::from_millis(50));
        assert_eq!(settings.log_level, Level::INFO);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [animation]
            clear_interval = 5

            [log]
            level = "trace"
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(&Cli::default(), config);
        assert_eq!(settings.clear_interval.get(), 5);
        assert_eq!(settings.frame_delay, Duration::from_millis(50));
        assert_eq!(settings.log_level, Level::TRACE);
        assert_eq!(settings.title, "EGL buffer preserve");
    }

    #[test]
    fn cli_overrides_config() {
        let config: Config = toml::from_str(
            r#"
            [window]
            width = 800
            height = 600
            title = "preserve"

            [animation]
            clear_interval = 5
            frame_delay_ms = 16
            "#,
        )
        .unwrap();
        let cli = Cli {
            width: Some(640),
            clear_interval: Some(30),
            log_level: Some(Level::WARN),
            ..Cli::default()
        };

        let settings = Settings::resolve(&cli, config);
        assert_eq!(settings.width, 640);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.title, "preserve");
        assert_eq!(settings.clear_interval.get(), 30);
        assert_eq!(settings.frame_delay, Duration::from_millis(16));
        assert_eq!(settings.log_level, Level::WARN);
    }

    #[test]
    fn zero_interval_falls_back() {
        let config: Config = toml::from_str("[animation]\nclear_interval = 0\n").unwrap();
        let settings = Settings::resolve(&Cli::default(), config);
        assert_eq!(settings.clear_interval, DEFAULT_CLEAR_INTERVAL);
    }

    #[test]
    fn unknown_log_level_is_info() {
        let log = Log {
            level: Some("loud".to_string()),
        };
        assert_eq!(log.get_level(), Level::INFO);
    }

    #[test]
    fn expands_home_directory() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                get_expanded_path(Path::new("~/.config/preserve-egl/config.toml")),
                home.join(".config/preserve-egl/config.toml")
            );
        }
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                get_expanded_path(Path::new("$HOME/config.toml")),
                Path::new(&home).join("config.toml")
            );
        }
    }

    #[test]
    fn unset_variable_keeps_path() {
        assert_eq!(
            get_expanded_path(Path::new("$PRESERVE_EGL_UNSET_VAR/config.toml")),
            PathBuf::from("$PRESERVE_EGL_UNSET_VAR/config.toml")
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 320").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.window.unwrap().width, Some(320));
    }

    #[test]
    fn load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window = [").unwrap();

        assert!(Config::load(file.path()).is_none());
        assert!(Config::load(Path::new("/nonexistent/preserve-egl.toml")).is_none());
    }
}
