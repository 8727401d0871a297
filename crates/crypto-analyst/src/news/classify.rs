//! Signal Classifier
//!
//! Pure keyword-driven categorization and sentiment scoring for news
//! text. Stateless given the fixed keyword tables.

use crate::model::{Category, Sentiment};

const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Bitcoin, &["bitcoin", "btc", "satoshi"]),
    (
        Category::Ethereum,
        &["ethereum", "eth", "vitalik", "eip", "merge", "staking"],
    ),
    (
        Category::Defi,
        &[
            "defi",
            "decentralized finance",
            "yield",
            "liquidity",
            "uniswap",
            "aave",
            "compound",
        ],
    ),
    (
        Category::Regulation,
        &[
            "regulation",
            "sec",
            "cftc",
            "fda",
            "government",
            "ban",
            "legal",
            "compliance",
        ],
    ),
    (
        Category::Technology,
        &[
            "blockchain",
            "smart contract",
            "consensus",
            "mining",
            "node",
            "protocol",
        ],
    ),
    (
        Category::Market,
        &[
            "price",
            "bull",
            "bear",
            "rally",
            "crash",
            "volatility",
            "trading",
        ],
    ),
    (
        Category::Adoption,
        &[
            "adoption",
            "institutional",
            "corporate",
            "mainstream",
            "acceptance",
        ],
    ),
    (
        Category::Security,
        &["hack", "exploit", "vulnerability", "security", "breach", "scam"],
    ),
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "surge",
    "rally",
    "bullish",
    "growth",
    "adoption",
    "partnership",
    "upgrade",
    "launch",
    "success",
    "breakthrough",
    "positive",
    "gains",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "crash",
    "dump",
    "bearish",
    "decline",
    "hack",
    "ban",
    "regulation",
    "vulnerability",
    "scam",
    "negative",
    "losses",
    "concerns",
];

/// Return every category whose keyword list has at least one substring
/// match in the lower-cased text. Categories are independent; a text
/// may match several. `General` when nothing matches.
pub fn categorize(text: &str) -> Vec<Category> {
    let text = text.to_lowercase();
    let categories: Vec<Category> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .collect();

    if categories.is_empty() {
        vec![Category::General]
    } else {
        categories
    }
}

/// Score text as positive matches minus negative matches.
///
/// The label has a dead zone: a net score in {-1, 0, 1} counts as
/// neutral, so ties and single-keyword matches do not trigger on weak
/// signals.
pub fn sentiment(text: &str) -> (Sentiment, i32) {
    let text = text.to_lowercase();

    let positive = POSITIVE_KEYWORDS.iter().filter(|k| text.contains(**k)).count() as i32;
    let negative = NEGATIVE_KEYWORDS.iter().filter(|k| text.contains(**k)).count() as i32;
    let score = positive - negative;

    let label = if score > 1 {
        Sentiment::Positive
    } else if score < -1 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    (label, score)
}
