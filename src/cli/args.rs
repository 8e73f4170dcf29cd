use crate::config::{parse_backend_list, CompareConfig, DisplayMode};
use crate::error::ParleyError;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Ask several AI backends one question and compare their answers")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Comma-separated backend ids to query (two or more; omit for automatic
    /// selection of the two most economical backends)
    #[arg(short = 'b', long)]
    pub backends: Option<String>,

    /// Also register the optional standard-tier catalog entries
    #[arg(long)]
    pub include_optional: bool,

    /// Maximum time per backend call in seconds (10-300)
    #[arg(short = 't', long, default_value = "60", value_parser = validate_timeout)]
    pub timeout: u64,

    /// Report layout: side-by-side, unified or analysis-only
    #[arg(short = 'm', long, default_value = "side-by-side")]
    pub mode: String,

    /// Use the canned offline backends (no API keys required)
    #[arg(long)]
    pub offline: bool,

    /// Skip the interactive "query another backend?" prompt
    #[arg(long)]
    pub no_interactive: bool,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output including per-backend timings
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// The prompt to compare; read from stdin when omitted
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

impl Cli {
    pub fn parse_args() -> Result<Self, ParleyError> {
        let cli = Self::try_parse().map_err(|e| ParleyError::InvalidArguments(e.to_string()))?;
        cli.validate()?;
        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), ParleyError> {
        if !(10..=300).contains(&self.timeout) {
            return Err(ParleyError::InvalidArguments(
                "Timeout must be between 10 and 300 seconds".to_string(),
            ));
        }
        self.get_display_mode()?;

        if let Some(ref list) = self.backends {
            if parse_backend_list(list).len() == 1 {
                return Err(ParleyError::InvalidArguments(
                    "A comparison needs at least two backends".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Preferred backend ids; `PARLEY_BACKENDS` overrides the flag.
    pub fn get_backends(&self) -> Vec<String> {
        if let Ok(env_list) = std::env::var("PARLEY_BACKENDS") {
            let parsed = parse_backend_list(&env_list);
            if !parsed.is_empty() {
                return parsed;
            }
        }
        self.backends
            .as_deref()
            .map(parse_backend_list)
            .unwrap_or_default()
    }

    /// Display mode; `PARLEY_DISPLAY_MODE` overrides the flag.
    pub fn get_display_mode(&self) -> Result<DisplayMode, ParleyError> {
        if let Ok(env_mode) = std::env::var("PARLEY_DISPLAY_MODE") {
            return DisplayMode::from_str(&env_mode);
        }
        DisplayMode::from_str(&self.mode)
    }

    /// Per-call timeout; `PARLEY_DEFAULT_TIMEOUT` overrides the flag when it
    /// holds a value in range.
    pub fn get_timeout_seconds(&self) -> u64 {
        if let Ok(timeout_str) = std::env::var("PARLEY_DEFAULT_TIMEOUT") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if (10..=300).contains(&timeout) {
                    return timeout;
                }
            }
        }
        self.timeout
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn should_use_color(&self) -> bool {
        std::env::var("NO_COLOR").is_err()
    }

    /// The prompt given on the command line, if any.
    pub fn prompt_text(&self) -> Option<String> {
        if self.prompt.is_empty() {
            None
        } else {
            Some(self.prompt.join(" "))
        }
    }

    pub fn to_config(&self) -> Result<CompareConfig, ParleyError> {
        Ok(CompareConfig::new(
            self.get_backends(),
            self.include_optional,
            self.get_display_mode()?,
        ))
    }
}

fn validate_timeout(s: &str) -> Result<u64, String> {
    let timeout: u64 = s.parse().map_err(|_| "Timeout must be a number")?;
    if (10..=300).contains(&timeout) {
        Ok(timeout)
    } else {
        Err("Timeout must be between 10 and 300 seconds".to_string())
    }
}
