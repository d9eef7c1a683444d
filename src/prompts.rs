// src/prompts.rs
//
// Static locale/mode tables and the prompt templates sent to the models.

use crate::api::Mode;

pub const IMAGE_MODEL: &str = "@cf/bytedance/stable-diffusion-xl-lightning";
pub const TEXT_MODEL: &str = "@cf/meta/llama-3-8b-instruct";

pub const TEXT_SYSTEM: &str = "You are a JSON-only API. No conversation. No markdown blocks.";
pub const ANALYZE_SYSTEM: &str = "Output raw JSON only.";

/// Longest prefix of the submitted content that is sent for analysis.
pub const ANALYZE_MAX_CHARS: usize = 1000;

#[derive(Debug, PartialEq, Eq)]
pub struct LocaleContext {
    pub region: &'static str,
    pub currency: &'static str,
    pub culture: &'static str,
}

static KO: LocaleContext = LocaleContext { region: "South Korea", currency: "KRW", culture: "Korean" };
static EN: LocaleContext = LocaleContext { region: "United States", currency: "USD", culture: "American" };
static JA: LocaleContext = LocaleContext { region: "Japan", currency: "JPY", culture: "Japanese" };

/// Looks up the locale for a language code, falling back to Korean.
pub fn locale_context(lang: &str) -> &'static LocaleContext {
    match lang {
        "en" => &EN,
        "ja" => &JA,
        _ => &KO,
    }
}

impl Mode {
    pub fn template(self) -> &'static str {
        match self {
            Mode::AdsenseApproval => "Role: Expert Academic Blogger. Style: Informative, long-form (3000+ chars), formal tone. Structure: Background -> Technical Analysis -> Practical Implications -> Summary.",
            Mode::Pasona => "Role: Direct Response Copywriter. Style: Persuasive, emotional, PASONA formula (Problem, Affinity, Solution, Offer, Narrow, Action). Focus on high CTR.",
            Mode::Grant => "Role: Policy Specialist. Style: Clear, factual. MUST include an HTML <table> for eligibility/benefits. Step-by-step guide.",
            Mode::Plain => "",
        }
    }
}

pub fn image_prompt(topic: &str) -> String {
    format!("High-quality professional blog hero image for \"{topic}\", clean, 4k, no text")
}

pub fn text_prompt(topic: &str, lang: &str, mode: Option<Mode>) -> String {
    let ctx = locale_context(lang);
    let mode_system = mode.map(Mode::template).unwrap_or_default();
    format!(
        "Write a professional blog post about \"{topic}\" in {lang}.\n\
         Target Region: {region}.\n\
         {mode_system}\n\
         Return ONLY a JSON object: {{\"title\": \"...\", \"body\": \"...\"}}. \
         Use HTML tags (h2, h3, p, table, ul, li).",
        region = ctx.region,
    )
}

pub fn analyze_prompt(content: &str, lang: &str) -> String {
    let excerpt = truncate_chars(content, ANALYZE_MAX_CHARS);
    format!(
        "Analyze this for SEO, Revenue, and Approval probability in {lang}: \"{excerpt}\".\n\
         Return JSON only: {{\"seo\": 0-100, \"rev\": 0-100, \"app\": 0-100, \"advice\": \"One sentence\"}}"
    )
}

/// Returns at most `max` characters from the start of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_resolves_to_united_states() {
        assert_eq!(locale_context("en").region, "United States");
        assert_eq!(locale_context("en").currency, "USD");
    }

    #[test]
    fn unmapped_language_falls_back_to_korean() {
        assert_eq!(locale_context("fr"), locale_context("ko"));
        assert_eq!(locale_context("").region, "South Korea");
        assert!(std::ptr::eq(locale_context("de"), &KO));
        assert_eq!(locale_context("ja").culture, "Japanese");
    }

    #[test]
    fn image_prompt_embeds_topic_verbatim() {
        let prompt = image_prompt("Seoul night \"market\"");
        assert!(prompt.contains("Seoul night \"market\""));
        assert!(prompt.ends_with("4k, no text"));
    }

    #[test]
    fn grant_mode_asks_for_a_table() {
        let prompt = text_prompt("housing subsidy", "ja", Some(Mode::Grant));
        assert!(prompt.contains("MUST include an HTML <table>"));
        assert!(prompt.contains("Target Region: Japan."));
        assert!(prompt.contains("in ja."));
    }

    #[test]
    fn plain_mode_adds_no_instruction() {
        let with_plain = text_prompt("t", "en", Some(Mode::Plain));
        let without = text_prompt("t", "en", None);
        assert_eq!(with_plain, without);
        assert!(!without.contains("Role:"));
    }

    #[test]
    fn unknown_language_keeps_code_but_uses_korean_region() {
        let prompt = text_prompt("t", "fr", None);
        assert!(prompt.contains("in fr."));
        assert!(prompt.contains("Target Region: South Korea."));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s = "가".repeat(1500);
        let cut = truncate_chars(&s, ANALYZE_MAX_CHARS);
        assert_eq!(cut.chars().count(), 1000);
        assert_eq!(truncate_chars("short", 1000), "short");
    }

    #[test]
    fn analyze_prompt_truncates_content() {
        let content = format!("{}{}", "a".repeat(1000), "TAIL");
        let prompt = analyze_prompt(&content, "en");
        assert!(prompt.contains(&format!("\"{}\"", "a".repeat(1000))));
        assert!(!prompt.contains("TAIL"));
    }
}
