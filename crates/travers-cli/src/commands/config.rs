//! `travers config`: inspect and edit the persistent defaults

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};
use crate::output::render_table;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the stored value of one key
    Get { key: String },
    /// Store a value; pass an empty string to clear the key
    Set { key: String, value: String },
    /// Show every key with its stored value
    List,
    /// Print where the config file lives
    Path,
    /// Write a fresh config file with table output selected
    Init {
        /// Replace a config file that already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();
    match &args.action {
        ConfigAction::Get { key } => {
            if !Config::keys().contains(&key.as_str()) {
                anyhow::bail!(
                    "Unknown config key: {}. Available keys: {}",
                    key,
                    Config::keys().join(", ")
                );
            }
            println!("{}", display_value(&Config::load(), key));
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::List => {
            let config = Config::load();
            let rows: Vec<Vec<String>> = Config::keys()
                .iter()
                .map(|key| vec![key.to_string(), display_value(&config, key)])
                .collect();
            print!("{}", render_table(&["KEY", "VALUE"], &rows));
            println!("({})", path.display());
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; rerun with --force to replace it",
                    path.display()
                );
            }
            Config {
                format: Some("table".to_string()),
                ..Config::default()
            }
            .save()?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn display_value(config: &Config, key: &str) -> String {
    config.get(key).unwrap_or_else(|| "(not set)".to_string())
}
