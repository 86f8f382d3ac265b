use anyhow::Result;
use clap::Parser;
use std::path::Path;

/// Command-line arguments for gemini-relay-rs
#[derive(Parser, Debug)]
#[command(name = "gemini-relay-rs")]
#[command(author, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Display version information
    #[arg(long)]
    pub version: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate that the config file exists
    pub fn validate_config_path(&self) -> Result<()> {
        let config_path = Path::new(&self.config);

        if !config_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}\n\
                 Please create a config.toml file or specify a valid path with --config",
                self.config
            ));
        }

        if !config_path.is_file() {
            return Err(anyhow::anyhow!(
                "Configuration path is not a file: {}",
                self.config
            ));
        }

        Ok(())
    }

    /// Execute the appropriate command based on parsed arguments.
    /// Returns true if a command was executed, false if the server should start.
    pub fn execute_command(&self) -> bool {
        if self.version {
            self.display_version();
            return true;
        }

        false
    }

    /// Display the version information
    fn display_version(&self) {
        println!("gemini-relay-rs {}", env!("CARGO_PKG_VERSION"));
    }
}
