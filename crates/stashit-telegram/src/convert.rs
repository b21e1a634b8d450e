//! Telegram `Message` → core inbound model.

use teloxide::types::Message;

use stashit_core::{
    domain::{ChatId, FileRef, UserId},
    normalize::{Attachment, InboundMessage},
};

/// Map a Telegram message into the core model. Messages with no sender
/// (channel posts, service messages) are dropped.
pub fn inbound_from_message(msg: &Message) -> Option<InboundMessage> {
    let user = msg.from()?;

    Some(InboundMessage {
        chat_id: ChatId(msg.chat.id.0),
        sender: UserId(user.id.0 as i64),
        text: msg.text().map(|s| s.to_string()),
        attachment: attachment_from_message(msg),
    })
}

fn attachment_from_message(msg: &Message) -> Option<Attachment> {
    if let Some(photos) = msg.photo() {
        // Telegram delivers resolution variants smallest-first.
        return Some(Attachment::Photo {
            variants: photos.iter().map(|p| FileRef(p.file.id.clone())).collect(),
        });
    }

    if let Some(doc) = msg.document() {
        return Some(Attachment::Document {
            file_ref: FileRef(doc.file.id.clone()),
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.as_ref().map(|m| m.essence_str().to_string()),
        });
    }

    if let Some(audio) = msg.audio() {
        return Some(Attachment::Audio {
            file_ref: FileRef(audio.file.id.clone()),
            file_name: audio.file_name.clone(),
            mime_type: audio.mime_type.as_ref().map(|m| m.essence_str().to_string()),
        });
    }

    if let Some(video) = msg.video() {
        return Some(Attachment::Video {
            file_ref: FileRef(video.file.id.clone()),
            file_name: video.file_name.clone(),
            mime_type: video.mime_type.as_ref().map(|m| m.essence_str().to_string()),
        });
    }

    // Stickers, voice notes, locations etc. fall through to the
    // normalizer's silent no-op.
    None
}
