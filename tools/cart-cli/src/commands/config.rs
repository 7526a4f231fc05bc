//! Configuration commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Init { force } => init(force, ctx),
        ConfigCommand::Show => show(ctx),
    }
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Configuration");
    ctx.output.kv("storage key", &config.cart.storage_key);
    ctx.output.kv("catalog timeout", &format!("{}ms", config.cart.catalog_timeout_ms));
    ctx.output.kv("stock timeout", &format!("{}ms", config.cart.stock_timeout_ms));
    ctx.output.kv(
        "reset corrupt snapshot",
        &config.cart.reset_corrupt_snapshot.to_string(),
    );
    ctx.output.kv(
        "catalog fixture",
        &ctx.resolve_path(&config.catalog.fixture).display().to_string(),
    );
    ctx.output.kv(
        "store directory",
        &ctx.resolve_path(&config.store.dir).display().to_string(),
    );
    Ok(())
}
