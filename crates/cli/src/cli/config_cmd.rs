use std::path::Path;

use crate::cli::ConfigArgs;
use crate::config::AppConfig;

pub fn execute(args: ConfigArgs, path: Option<&Path>) -> anyhow::Result<()> {
    match args.action {
        crate::cli::ConfigAction::Show => {
            let cfg = AppConfig::load_or_default(path)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        crate::cli::ConfigAction::Set { key, value } => {
            let mut cfg = AppConfig::load_or_default(path)?;
            apply(&mut cfg, &key, &value)?;
            cfg.save(path)?;
            println!("Configuration updated.");
        }
    }
    Ok(())
}

fn apply(cfg: &mut AppConfig, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "max_token_size" => {
            let size: usize = value.parse()?;
            if size == 0 {
                anyhow::bail!("max_token_size must be greater than zero");
            }
            cfg.parse.max_token_size = size;
        }
        "strict" => cfg.strict = value.parse()?,
        _ => anyhow::bail!("Unknown config key: {key}"),
    }
    Ok(())
}
