use serde::Deserialize;

/// Main configuration structure for Bedesten
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub skip: SkipConfig,
}

/// Render-API fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Endpoint of the remote rendering service
    #[serde(rename = "api-endpoint")]
    pub api_endpoint: String,

    /// Name of the environment variable holding the API credential
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Maximum underlying calls per logical fetch; also bounds the driver's
    /// extraction-retry budget
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Input batch discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Directory holding the `<prefix>_page_<offset>.json` batch files
    #[serde(default = "default_input_directory")]
    pub directory: String,

    /// Batch file prefix; empty means the input directory's own basename
    #[serde(default)]
    pub prefix: String,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one review artifact per entity
    #[serde(rename = "reviews-dir", default = "default_reviews_dir")]
    pub reviews_dir: String,

    /// Path of the combined catalog listings artifact
    #[serde(rename = "listings-path", default = "default_listings_path")]
    pub listings_path: String,
}

/// Entities to skip by exact name match
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkipConfig {
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_directory(),
            prefix: String::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reviews_dir: default_reviews_dir(),
            listings_path: default_listings_path(),
        }
    }
}

fn default_max_attempts() -> u32 {
    10
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_input_directory() -> String {
    ".".to_string()
}

fn default_reviews_dir() -> String {
    "Reviews".to_string()
}

fn default_listings_path() -> String {
    "data.json".to_string()
}
