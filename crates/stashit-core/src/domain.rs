use serde::{Deserialize, Serialize};

/// Telegram user id (numeric, stable per user).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Opaque platform file reference (Telegram `file_id`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileRef(pub String);

/// Item kind on the StashIt wire (`type` tag).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Note,
    Image,
    Document,
    Audio,
    Video,
}

impl ItemKind {
    /// Capitalized label used in success replies ("Photo saved to StashIt!").
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Note => "Note",
            ItemKind::Image => "Photo",
            ItemKind::Document => "Document",
            ItemKind::Audio => "Audio",
            ItemKind::Video => "Video",
        }
    }

    /// Lowercase source word used in failure replies ("Failed to save photo: ...").
    pub fn source_word(&self) -> &'static str {
        match self {
            ItemKind::Note => "note",
            ItemKind::Image => "photo",
            ItemKind::Document => "document",
            ItemKind::Audio => "audio",
            ItemKind::Video => "video",
        }
    }
}

/// Normalized record POSTed to the StashIt ingestion API.
///
/// Built only through [`Item::note`] and [`Item::file`], which keep the
/// shape invariant: a note carries `content` and no file fields, every
/// other kind carries `file_url` and no `content`.
#[derive(Clone, Debug, Serialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub telegram_user_id: i64,
}

impl Item {
    pub fn note(content: impl Into<String>, sender: UserId) -> Self {
        Self {
            kind: ItemKind::Note,
            content: Some(content.into()),
            file_url: None,
            file_name: None,
            mime_type: None,
            telegram_user_id: sender.0,
        }
    }

    pub fn file(kind: ItemKind, stored: &StoredObject, file_name: &str, sender: UserId) -> Self {
        // Prefer the permanent public URL when the bucket allows it; the
        // signed URL expires after the TTL window.
        let file_url = stored
            .public_url
            .clone()
            .unwrap_or_else(|| stored.signed_url.clone());
        Self {
            kind,
            content: None,
            file_url: Some(file_url),
            file_name: Some(file_name.to_string()),
            mime_type: Some(stored.mime_type.clone()),
            telegram_user_id: sender.0,
        }
    }
}

/// Result of a successful object-storage upload.
#[derive(Clone, Debug)]
pub struct StoredObject {
    pub key: String,
    pub mime_type: String,
    pub signed_url: String,
    /// Only set when the store is configured for public access.
    pub public_url: Option<String>,
}

/// Downstream response to a submission. The body is kept verbatim;
/// structure is best-effort and never required.
#[derive(Clone, Debug)]
pub struct Submission {
    pub raw: String,
    pub parsed: Option<serde_json::Value>,
}

/// One-shot account-linking request.
#[derive(Clone, Debug, Serialize)]
pub struct LinkRequest {
    pub code: String,
    pub telegram_user_id: i64,
}

/// Downstream verdict on a linking code. Both fields are defaulted so a
/// malformed body degrades to a generic failure instead of an error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LinkOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(public: Option<&str>) -> StoredObject {
        StoredObject {
            key: "1700_report.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            signed_url: "https://s3.example/signed".to_string(),
            public_url: public.map(|s| s.to_string()),
        }
    }

    #[test]
    fn note_wire_shape() {
        let item = Item::note("remember this", UserId(42));
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "type": "note",
                "content": "remember this",
                "telegram_user_id": 42
            })
        );
    }

    #[test]
    fn file_wire_shape() {
        let item = Item::file(ItemKind::Document, &stored(None), "report.pdf", UserId(7));
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "type": "document",
                "file_url": "https://s3.example/signed",
                "file_name": "report.pdf",
                "mime_type": "application/pdf",
                "telegram_user_id": 7
            })
        );
    }

    #[test]
    fn file_prefers_public_url() {
        let item = Item::file(
            ItemKind::Image,
            &stored(Some("https://cdn.example/pic.jpg")),
            "pic.jpg",
            UserId(7),
        );
        assert_eq!(item.file_url.as_deref(), Some("https://cdn.example/pic.jpg"));
    }

    #[test]
    fn link_outcome_defaults_on_partial_body() {
        let out: LinkOutcome = serde_json::from_str("{}").unwrap();
        assert!(!out.success);
        assert!(out.error.is_none());

        let out: LinkOutcome = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(out.success);
    }
}
