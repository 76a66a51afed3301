use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Read from `API_KEY` or `GEMINI_API_KEY` when not set in the file
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Characters of document text embedded into the prompt (default: 38000)
    pub max_text_chars: usize,
    /// Request body ceiling in bytes; accepts "10mb", "512kb" (default: 10 MiB)
    #[serde(deserialize_with = "deserialize_byte_size")]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given file, else from conf/config.toml or config.toml
    /// 2. Override with environment variables
    /// 3. Validate the final configuration
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::find_config_file) {
            Some(config_path) => Self::from_toml(&config_path)?,
            None => {
                tracing::warn!("Configuration file not found, using defaults");
                Config::default()
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Same as [`Config::load`], with a temporary console subscriber installed
    /// for the duration of the load. The process-wide subscriber depends on the
    /// loaded `[logging]` section, so loader messages would otherwise be lost.
    pub fn load_with_bootstrap_logging<W>(path: Option<&Path>, writer: W) -> Result<Self, anyhow::Error>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let bootstrap = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .finish();

        tracing::subscriber::with_default(bootstrap, || Self::load(path))
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PORT / APP_SERVER_PORT: Server port (default: 3001)
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - API_KEY / GEMINI_API_KEY: Gemini credential (first one set wins)
    /// - APP_GEMINI_MODEL: Gemini model name
    /// - APP_GEMINI_BASE_URL: Gemini API root
    /// - APP_BODY_LIMIT: Request body ceiling (accepts "10mb", "512kb", bytes)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,clauseg=debug")
    fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        for key in ["PORT", "APP_SERVER_PORT"] {
            if let Some(port) = var(key)
                && let Ok(port) = port.parse()
            {
                self.server.port = port;
                tracing::info!("Override server.port from {}: {}", key, self.server.port);
            }
        }

        if let Some(api_key) = var("API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            self.gemini.api_key = Some(api_key);
            tracing::info!("Override gemini.api_key from env");
        }

        if let Some(model) = var("APP_GEMINI_MODEL") {
            self.gemini.model = model;
            tracing::info!("Override gemini.model from env: {}", self.gemini.model);
        }

        if let Some(base_url) = var("APP_GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
            tracing::info!("Override gemini.base_url from env: {}", self.gemini.base_url);
        }

        if let Some(limit) = var("APP_BODY_LIMIT") {
            match parse_byte_size(&limit) {
                Ok(val) => {
                    self.analysis.body_limit_bytes = val;
                    tracing::info!(
                        "Override analysis.body_limit_bytes from env: {}",
                        self.analysis.body_limit_bytes
                    );
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_BODY_LIMIT '{}': {} (keep {})",
                    limit,
                    e,
                    self.analysis.body_limit_bytes
                ),
            }
        }

        if let Some(level) = var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    ///
    /// A missing API key is not an error here; startup continues without it.
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("gemini.model cannot be empty");
        }

        if self.analysis.max_text_chars == 0 {
            anyhow::bail!("analysis.max_text_chars must be > 0");
        }
        if self.analysis.body_limit_bytes == 0 {
            anyhow::bail!("analysis.body_limit_bytes must be > 0");
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn find_config_file() -> Option<PathBuf> {
        ["conf/config.toml", "config.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3001 }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { max_text_chars: 38_000, body_limit_bytes: 10 * 1024 * 1024 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,clauseg=debug".to_string(), file: None }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_byte_size(input: &str) -> Result<usize, String> {
    // Accept plain numbers (treated as bytes)
    if let Ok(val) = input.parse::<usize>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: usize = num_str.parse().map_err(|_| "invalid number".to_string())?;
    let factor = match unit.trim() {
        "b" => 1,
        "k" | "kb" | "kib" => 1024,
        "m" | "mb" | "mib" => 1024 * 1024,
        "g" | "gb" | "gib" => 1024 * 1024 * 1024,
        other => return Err(format!("unsupported unit: {}", other)),
    };
    n.checked_mul(factor).ok_or_else(|| "size overflows".to_string())
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_byte_size<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = usize;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of bytes or a string like '512kb', '10mb'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            usize::try_from(v).map_err(E::custom)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            usize::try_from(v).map_err(|_| E::custom("negative not allowed"))
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_byte_size(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
