// src/api.rs

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Values accepted in the `type` field of an [`Envelope`]. Must list every
/// [`Envelope::kind`].
pub const ENVELOPE_TYPES: [&str; 3] = ["image", "text", "analyze"];

/// The request body, discriminated by its `type` field.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    Image {
        topic: String,
    },
    Text {
        topic: String,
        #[serde(default)]
        mode: Option<Mode>,
        #[serde(default)]
        lang: Option<String>,
    },
    Analyze {
        #[serde(rename = "contentToRefine")]
        content_to_refine: String,
        #[serde(default)]
        lang: Option<String>,
    },
}

impl Envelope {
    /// The `type` value this variant is decoded from.
    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Image { .. } => "image",
            Envelope::Text { .. } => "text",
            Envelope::Analyze { .. } => "analyze",
        }
    }
}

/// Language used when `lang` is absent or `null`.
pub const DEFAULT_LANG: &str = "ko";

pub fn lang_or_default(lang: Option<String>) -> String {
    lang.unwrap_or_else(|| DEFAULT_LANG.to_string())
}

/// Writing style requested for `text` generation. Unrecognised values map to
/// [`Mode::Plain`], which adds no extra instruction.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    AdsenseApproval,
    Pasona,
    Grant,
    #[serde(other)]
    Plain,
}

#[derive(Serialize, Debug)]
pub struct ImageResponse {
    pub image: String,
}

/// Model text, expected to be a JSON document but never verified.
#[derive(Serialize, Debug)]
pub struct TextResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_envelope_defaults_lang_to_korean() {
        let env: Envelope =
            serde_json::from_str(r#"{"type":"text","topic":"tea"}"#).unwrap();
        match env {
            Envelope::Text { topic, mode, lang } => {
                assert_eq!(topic, "tea");
                assert_eq!(mode, None);
                assert_eq!(lang_or_default(lang), "ko");
            }
            other => panic!("unexpected envelope {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_plain() {
        let env: Envelope =
            serde_json::from_str(r#"{"type":"text","topic":"t","mode":"haiku","lang":"en"}"#)
                .unwrap();
        assert!(matches!(env, Envelope::Text { mode: Some(Mode::Plain), .. }));
    }

    #[test]
    fn analyze_reads_camel_case_content() {
        let env: Envelope =
            serde_json::from_str(r#"{"type":"analyze","contentToRefine":"draft"}"#).unwrap();
        assert!(matches!(
            env,
            Envelope::Analyze { ref content_to_refine, lang: None } if content_to_refine == "draft"
        ));
    }

    #[test]
    fn null_lang_falls_back_to_korean() {
        let env: Envelope =
            serde_json::from_str(r#"{"type":"text","topic":"t","lang":null}"#).unwrap();
        match env {
            Envelope::Text { lang, .. } => assert_eq!(lang_or_default(lang), "ko"),
            other => panic!("unexpected envelope {other:?}"),
        }
    }

    #[test]
    fn every_listed_type_decodes_to_its_variant() {
        let bodies = [
            json!({ "type": "image", "topic": "t" }),
            json!({ "type": "text", "topic": "t" }),
            json!({ "type": "analyze", "contentToRefine": "c" }),
        ];
        let kinds: Vec<&str> = bodies
            .into_iter()
            .map(|body| serde_json::from_value::<Envelope>(body).unwrap().kind())
            .collect();
        assert_eq!(kinds, ENVELOPE_TYPES);
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_value(Message::system("x")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "x"}));
    }

    #[test]
    fn text_response_omits_missing_result() {
        let json = serde_json::to_string(&TextResponse { result: None }).unwrap();
        assert_eq!(json, "{}");
    }
}
