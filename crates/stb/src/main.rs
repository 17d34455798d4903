use std::sync::Arc;

use stb_core::{config::Config, state::BotState};

#[tokio::main]
async fn main() -> Result<(), stb_core::Error> {
    stb_core::logging::init("stb")?;

    let cfg = Arc::new(Config::load()?);
    let state = Arc::new(BotState::new());

    stb_telegram::router::run_polling(cfg, state)
        .await
        .map_err(|e| stb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
