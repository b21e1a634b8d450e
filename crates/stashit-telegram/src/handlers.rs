use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::{convert, router::AppState};

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(inbound) = convert::inbound_from_message(&msg) else {
        return Ok(());
    };

    // The pipeline converts every failure into reply text; nothing from
    // this message can leak into the handling of another.
    let Some(reply) = state.pipeline.handle(&inbound).await else {
        return Ok(());
    };

    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        tracing::warn!(chat_id = msg.chat.id.0, "failed to send reply: {e}");
    }

    Ok(())
}
