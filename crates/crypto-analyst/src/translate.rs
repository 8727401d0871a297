//! Summarize-and-Translate Capability
//!
//! Narrow interface to the optional AI text-generation service, plus
//! the local deterministic fallback: shorten to two sentences, then
//! per-term dictionary replacement into Japanese.

use async_trait::async_trait;

use crate::error::Result;

/// Output of the summarize/translate step for one news entry
#[derive(Clone, Debug)]
pub struct TranslatedNews {
    pub title: String,
    pub summary: String,

    /// Whether any translation was actually applied
    pub applied: bool,
}

/// Optional AI summarize/translate capability.
///
/// Injected as `Option<Arc<dyn SummarizeTranslate>>`; when absent or
/// erroring, the aggregator takes [`keyword_fallback`] instead. The
/// fallback is a first-class branch, not an exception handler.
#[async_trait]
pub trait SummarizeTranslate: Send + Sync {
    /// Summarize and translate a title/summary pair. `full_text` is
    /// best-effort article body, purely additive input.
    async fn process(
        &self,
        title: &str,
        summary: &str,
        full_text: Option<&str>,
    ) -> Result<TranslatedNews>;

    /// Capability name, for logging
    fn name(&self) -> &str;
}

/// English -> Japanese dictionary for common crypto terms
const TRANSLATION_TERMS: &[(&str, &str)] = &[
    // Market terms
    ("surge", "急騰"),
    ("rally", "上昇"),
    ("bullish", "強気"),
    ("bearish", "弱気"),
    ("dump", "暴落"),
    ("crash", "クラッシュ"),
    ("pump", "急騰"),
    ("moon", "高騰"),
    ("gains", "利益"),
    ("losses", "損失"),
    ("volatility", "ボラティリティ"),
    ("adoption", "採用"),
    ("breakthrough", "突破"),
    ("partnership", "パートナーシップ"),
    // Crypto terms
    ("bitcoin", "ビットコイン"),
    ("ethereum", "イーサリアム"),
    ("blockchain", "ブロックチェーン"),
    ("cryptocurrency", "仮想通貨"),
    ("crypto", "仮想通貨"),
    ("defi", "DeFi"),
    ("smart contract", "スマートコントラクト"),
    ("mining", "マイニング"),
    ("wallet", "ウォレット"),
    ("exchange", "取引所"),
    ("trading", "取引"),
    // Action terms
    ("launched", "ローンチ"),
    ("announced", "発表"),
    ("revealed", "発表"),
    ("upgraded", "アップグレード"),
    ("integrated", "統合"),
    ("acquired", "買収"),
    ("invested", "投資"),
    ("funding", "資金調達"),
    ("raised", "調達"),
];

/// Deterministic local fallback: first two sentences plus ellipsis,
/// then per-term dictionary replacement.
pub fn keyword_fallback(title: &str, summary: &str) -> TranslatedNews {
    let short_summary = shorten_summary(summary);

    let translated_title = translate_terms(title);
    let translated_summary = translate_terms(&short_summary);

    let applied = translated_title != title || translated_summary != short_summary;

    TranslatedNews {
        title: translated_title,
        summary: translated_summary,
        applied,
    }
}

/// Keep the first two sentences; append an ellipsis when truncating
pub fn shorten_summary(summary: &str) -> String {
    let sentences: Vec<&str> = summary.split(". ").collect();
    let mut short = sentences[..sentences.len().min(2)].join(". ");
    if sentences.len() > 2 {
        short.push_str("...");
    }
    short
}

/// Replace every dictionary term, case-insensitive, whole-word
pub fn translate_terms(text: &str) -> String {
    let mut translated = text.to_string();
    for (english, japanese) in TRANSLATION_TERMS {
        translated = replace_word(&translated, english, japanese);
    }
    translated
}

/// Case-insensitive whole-word replacement. Terms are ASCII; word
/// boundaries are non-alphanumeric ASCII bytes or string edges.
fn replace_word(text: &str, term: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = find_word(rest, term) {
        out.push_str(&rest[..idx]);
        out.push_str(replacement);
        rest = &rest[idx + term.len()..];
    }
    out.push_str(rest);
    out
}

fn find_word(text: &str, term: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let term_bytes = term.as_bytes();
    if term_bytes.is_empty() || term_bytes.len() > bytes.len() {
        return None;
    }

    let mut i = 0;
    while i + term_bytes.len() <= bytes.len() {
        if text.is_char_boundary(i)
            && bytes[i..i + term_bytes.len()].eq_ignore_ascii_case(term_bytes)
        {
            let end = i + term_bytes.len();
            let before_ok = i == 0 || !bytes[i - 1].is_ascii_alphanumeric();
            let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
            if before_ok && after_ok && text.is_char_boundary(end) {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
