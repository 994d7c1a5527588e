use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or
/// `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the catalog search API.
    pub base_url: String,
    /// RapidAPI key sent with every request.
    pub api_key: String,
    /// RapidAPI host header sent with every request.
    pub api_host: String,
    /// Query issued on startup and whenever the search box is blank.
    pub default_query: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://deezerdevs-deezer.p.rapidapi.com".to_string(),
            api_key: "0b1cbf678amsh7ee5cab10cbccf4p142228jsn295aea796d99".to_string(),
            api_host: "deezerdevs-deezer.p.rapidapi.com".to_string(),
            default_query: "top hits".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume the player starts with, 0..=100.
    pub initial_volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { initial_volume: 50 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by `-` / `+`, in percent.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ vivace! It's only a preview ~ ".to_string(),
        }
    }
}
