mod config;
mod errors;
mod platform;

use anyhow::Result;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    platform::run_app(config).await
}
