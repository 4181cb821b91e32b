use crate::{
    notifier::{Notifier, TelegramNotifier},
    prelude::*,
};

use std::sync::Arc;

pub fn init_notifier(cfg: &Config) -> Result<Arc<dyn Notifier>> {
    if cfg.telegram.is_complete() {
        tracing::info!(
            chat_id = cfg.telegram.chat_id,
            api_base = %cfg.telegram.api_base,
            "Telegram notifications enabled"
        );
    } else {
        tracing::warn!(
            "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is missing, game results will not be relayed"
        );
    }

    let notifier = TelegramNotifier::new(cfg.telegram.clone())?;

    return Ok(Arc::new(notifier));
}
