use anyhow::Context;
use persona::domain::config::ApiConfig;
use persona::domain::constants::CONFIG_FILE;
use persona::kernel::config::load_config;
use persona_server::{Server, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some(CONFIG_FILE)).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}
