use std::env;

/// Baseline mining difficulty: required leading zero hex characters.
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Configuration for the hashledger CLI tool
///
/// This is a simple, single-threaded config suitable for an in-process
/// ledger. There is no persistence surface; everything lives for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mining difficulty: number of leading '0' hex characters a block
    /// hash must carry (default: 2)
    pub difficulty: u32,

    /// Output format: "human" (default) or "json"
    pub output_format: String,

    /// Log level: "info", "debug", "warn", "error" (default: "info")
    pub log_level: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Config {
            difficulty: DEFAULT_DIFFICULTY,
            output_format: "human".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Get mining difficulty
    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Set mining difficulty
    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }

    /// Get output format
    pub fn get_output_format(&self) -> &str {
        &self.output_format
    }

    /// Set output format ("human" or "json")
    pub fn set_output_format(&mut self, format: String) {
        self.output_format = format;
    }

    /// Get log level
    pub fn get_log_level(&self) -> &str {
        &self.log_level
    }

    /// Set log level
    pub fn set_log_level(&mut self, level: String) {
        self.log_level = level;
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `HASHLEDGER_DIFFICULTY`: override mining difficulty
    /// - `HASHLEDGER_OUTPUT_FORMAT`: "human" or "json"
    /// - `HASHLEDGER_LOG_LEVEL`: log level
    pub fn from_env() -> Self {
        let mut config = Config::new();

        if let Ok(difficulty) = env::var("HASHLEDGER_DIFFICULTY") {
            if let Ok(parsed) = difficulty.parse() {
                config.difficulty = parsed;
            }
        }

        if let Ok(format) = env::var("HASHLEDGER_OUTPUT_FORMAT") {
            config.output_format = format;
        }

        if let Ok(level) = env::var("HASHLEDGER_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
