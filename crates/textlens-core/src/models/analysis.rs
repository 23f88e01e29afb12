use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::stats;

/// Metrics computed for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub word_count: usize,
    pub character_count: usize,
    /// Only the ASCII space is removed; tabs and newlines still count.
    pub character_count_no_spaces: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub average_word_length: f64,
    pub longest_word: String,
    pub reading_time_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    #[serde(deserialize_with = "deserialize_analyzed_at")]
    pub analyzed_at: jiff::Timestamp,
    pub text_preview: String,
}

impl AnalysisMetadata {
    pub fn new(text: &str, analyzed_at: jiff::Timestamp) -> Self {
        Self {
            analyzed_at,
            text_preview: stats::text_preview(text),
        }
    }
}

/// Parse an `analyzedAt` value. Timestamps without an offset, as written by
/// older producers (`2025-02-01T12:34:56.789012`), are taken as UTC.
pub fn parse_analyzed_at(raw: &str) -> Result<jiff::Timestamp, jiff::Error> {
    raw.parse::<jiff::Timestamp>().or_else(|err| {
        raw.parse::<jiff::civil::DateTime>()
            .and_then(|dt| dt.to_zoned(jiff::tz::TimeZone::UTC))
            .map(|zoned| zoned.timestamp())
            .map_err(|_| err)
    })
}

fn deserialize_analyzed_at<'de, D: Deserializer<'de>>(d: D) -> Result<jiff::Timestamp, D::Error> {
    let raw = String::deserialize(d)?;
    parse_analyzed_at(&raw).map_err(D::Error::custom)
}

/// The document persisted for every successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub id: String,
    pub analysis: TextAnalysis,
    pub metadata: AnalysisMetadata,
    pub original_text: String,
}

impl AnalysisDocument {
    /// Analyze `text` and wrap the result in a new document.
    pub fn new(text: &str, id: Uuid, analyzed_at: jiff::Timestamp) -> Self {
        Self {
            id: id.to_string(),
            analysis: stats::analyze(text),
            metadata: AnalysisMetadata::new(text, analyzed_at),
            original_text: text.to_string(),
        }
    }

    /// Drop the original text, keeping what callers get back.
    pub fn into_summary(self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id,
            analysis: self.analysis,
            metadata: self.metadata,
        }
    }
}

/// The public view of a stored analysis: everything except the original text.
/// `id` stays an opaque string since the container may hold documents this
/// service did not write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: String,
    pub analysis: TextAnalysis,
    pub metadata: AnalysisMetadata,
}
