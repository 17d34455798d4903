use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{info, warn};

use stb_core::{
    audit::AuditLogger, commands::command_menu, config::Config,
    messaging::port::MessagingPort, state::BotState,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub bot_state: Arc<BotState>,
    pub messenger: Arc<dyn MessagingPort>,
    pub audit: Arc<AuditLogger>,
}

/// Run the bot on long polling until Ctrl-C.
pub async fn run_polling(cfg: Arc<Config>, bot_state: Arc<BotState>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        println!("stb started: @{}", me.username());
    }
    println!("Admin ids: {}", cfg.admin_ids.len());

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    // Declare the command surface to Telegram. /logs and /scan appear in the
    // menu without a bound handler.
    if let Err(e) = messenger.set_command_menu(&command_menu()).await {
        warn!("failed to register command menu: {e}");
    }

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        bot_state,
        messenger,
        audit: Arc::new(AuditLogger::new(
            cfg.audit_log_path.clone(),
            cfg.audit_log_json,
        )),
    });

    let handler = Update::filter_message().endpoint(handlers::handle_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build();

    // Run until cancelled: Ctrl-C trips the dispatcher's shutdown token,
    // which stops the polling loop and lets dispatch() return.
    let shutdown = dispatcher.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            if let Ok(done) = shutdown.shutdown() {
                done.await;
            }
        }
    });

    println!("🤖 Bot is running. Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    info!("bot stopped");
    Ok(())
}
