//! Per-message normalization.
//!
//! An inbound platform message is classified exactly once into an
//! [`Intent`]; the pipeline then matches on it exhaustively. Kind-specific
//! fallback file names and mime types are resolved here so the pipeline
//! has a single generic attachment path.

use crate::domain::{ChatId, FileRef, ItemKind, UserId};

/// Cross-messenger inbound message model.
///
/// Telegram-specific fields live in the Telegram adapter; at most one of
/// `text` / `attachment` is populated per handled message.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub sender: UserId,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

/// Platform attachment shapes.
#[derive(Clone, Debug)]
pub enum Attachment {
    /// Resolution variants in platform order, smallest first.
    Photo { variants: Vec<FileRef> },
    Document {
        file_ref: FileRef,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
    Audio {
        file_ref: FileRef,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
    Video {
        file_ref: FileRef,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
}

/// What a message asks the relay to do.
#[derive(Clone, Debug)]
pub enum Intent {
    Command(Command),
    Note { content: String },
    Save(SaveRequest),
    /// No text, no recognized attachment (stickers, locations, ...).
    /// Intentional silent no-op, not an error.
    Unhandled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Welcome,
    Link { code: String },
}

/// An attachment with its fallbacks already resolved.
#[derive(Clone, Debug)]
pub struct SaveRequest {
    pub kind: ItemKind,
    pub file_ref: FileRef,
    pub file_name: String,
    pub mime_type: String,
}

pub fn normalize(msg: &InboundMessage) -> Intent {
    if let Some(text) = msg.text.as_deref() {
        if text.starts_with('/') {
            return match parse_command(text) {
                Some(cmd) => Intent::Command(cmd),
                None => Intent::Unhandled,
            };
        }
        if !text.is_empty() {
            return Intent::Note {
                content: text.to_string(),
            };
        }
    }

    match &msg.attachment {
        Some(Attachment::Photo { variants }) => match variants.last() {
            // Telegram transcodes every photo to JPEG and delivers the
            // size list smallest-first; the last variant is the largest.
            Some(largest) => Intent::Save(SaveRequest {
                kind: ItemKind::Image,
                file_ref: largest.clone(),
                file_name: format!("{}.jpg", largest.0),
                mime_type: "image/jpeg".to_string(),
            }),
            None => Intent::Unhandled,
        },
        Some(Attachment::Document {
            file_ref,
            file_name,
            mime_type,
        }) => Intent::Save(SaveRequest {
            kind: ItemKind::Document,
            file_ref: file_ref.clone(),
            file_name: file_name.clone().unwrap_or_else(|| file_ref.0.clone()),
            mime_type: mime_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        }),
        Some(Attachment::Audio {
            file_ref,
            file_name,
            mime_type,
        }) => Intent::Save(save_media(
            ItemKind::Audio,
            file_ref,
            file_name,
            mime_type,
            "mp3",
            "audio/mpeg",
        )),
        Some(Attachment::Video {
            file_ref,
            file_name,
            mime_type,
        }) => Intent::Save(save_media(
            ItemKind::Video,
            file_ref,
            file_name,
            mime_type,
            "mp4",
            "video/mp4",
        )),
        None => Intent::Unhandled,
    }
}

fn save_media(
    kind: ItemKind,
    file_ref: &FileRef,
    file_name: &Option<String>,
    mime_type: &Option<String>,
    fallback_ext: &str,
    fallback_mime: &str,
) -> SaveRequest {
    SaveRequest {
        kind,
        file_ref: file_ref.clone(),
        file_name: file_name
            .clone()
            .unwrap_or_else(|| format!("{}.{fallback_ext}", file_ref.0)),
        mime_type: mime_type
            .clone()
            .unwrap_or_else(|| fallback_mime.to_string()),
    }
}

fn parse_command(text: &str) -> Option<Command> {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match cmd.as_str() {
        "start" | "help" => Some(Command::Welcome),
        "link" if !rest.is_empty() => Some(Command::Link {
            code: rest.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: Option<&str>, attachment: Option<Attachment>) -> InboundMessage {
        InboundMessage {
            chat_id: ChatId(1),
            sender: UserId(42),
            text: text.map(|s| s.to_string()),
            attachment,
        }
    }

    #[test]
    fn plain_text_becomes_note() {
        let intent = normalize(&msg(Some("buy milk"), None));
        match intent {
            Intent::Note { content } => assert_eq!(content, "buy milk"),
            other => panic!("expected note, got {other:?}"),
        }
    }

    #[test]
    fn start_and_help_are_welcome() {
        for text in ["/start", "/help", "/help@stashit_bot", "/start later"] {
            match normalize(&msg(Some(text), None)) {
                Intent::Command(Command::Welcome) => {}
                other => panic!("{text}: expected welcome, got {other:?}"),
            }
        }
    }

    #[test]
    fn link_with_code() {
        match normalize(&msg(Some("/link ABC123"), None)) {
            Intent::Command(Command::Link { code }) => assert_eq!(code, "ABC123"),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn bare_link_and_unknown_commands_are_ignored() {
        for text in ["/link", "/link  ", "/frobnicate", "/starting"] {
            assert!(
                matches!(normalize(&msg(Some(text), None)), Intent::Unhandled),
                "{text} should be unhandled"
            );
        }
    }

    #[test]
    fn photo_picks_last_variant() {
        let variants = vec![
            FileRef("small".into()),
            FileRef("medium".into()),
            FileRef("large".into()),
        ];
        match normalize(&msg(None, Some(Attachment::Photo { variants }))) {
            Intent::Save(req) => {
                assert_eq!(req.kind, ItemKind::Image);
                assert_eq!(req.file_ref.0, "large");
                assert_eq!(req.file_name, "large.jpg");
                assert_eq!(req.mime_type, "image/jpeg");
            }
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn document_keeps_declared_fields() {
        let att = Attachment::Document {
            file_ref: FileRef("ref1".into()),
            file_name: Some("report.pdf".into()),
            mime_type: Some("application/pdf".into()),
        };
        match normalize(&msg(None, Some(att))) {
            Intent::Save(req) => {
                assert_eq!(req.kind, ItemKind::Document);
                assert_eq!(req.file_name, "report.pdf");
                assert_eq!(req.mime_type, "application/pdf");
            }
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn document_falls_back_to_generic_binary() {
        let att = Attachment::Document {
            file_ref: FileRef("ref1".into()),
            file_name: None,
            mime_type: None,
        };
        match normalize(&msg(None, Some(att))) {
            Intent::Save(req) => {
                assert_eq!(req.file_name, "ref1");
                assert_eq!(req.mime_type, "application/octet-stream");
            }
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn audio_and_video_fallbacks() {
        let audio = Attachment::Audio {
            file_ref: FileRef("a1".into()),
            file_name: None,
            mime_type: None,
        };
        match normalize(&msg(None, Some(audio))) {
            Intent::Save(req) => {
                assert_eq!(req.kind, ItemKind::Audio);
                assert_eq!(req.file_name, "a1.mp3");
                assert_eq!(req.mime_type, "audio/mpeg");
            }
            other => panic!("expected save, got {other:?}"),
        }

        let video = Attachment::Video {
            file_ref: FileRef("v1".into()),
            file_name: Some("clip.mov".into()),
            mime_type: None,
        };
        match normalize(&msg(None, Some(video))) {
            Intent::Save(req) => {
                assert_eq!(req.kind, ItemKind::Video);
                assert_eq!(req.file_name, "clip.mov");
                assert_eq!(req.mime_type, "video/mp4");
            }
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn nothing_recognized_is_unhandled() {
        assert!(matches!(normalize(&msg(None, None)), Intent::Unhandled));
        assert!(matches!(normalize(&msg(Some(""), None)), Intent::Unhandled));
        assert!(matches!(
            normalize(&msg(None, Some(Attachment::Photo { variants: vec![] }))),
            Intent::Unhandled
        ));
    }
}
