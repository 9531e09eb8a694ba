use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::evaluation::record::DebateEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Resume,
    JobPosting,
    #[serde(other)]
    Other,
}

/// One uploaded document as listed by `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub file_type: FileType,
    #[serde(default)]
    pub original_name: Option<String>,
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl FileEntry {
    /// The uploader's original name when known, else the stored name.
    pub fn display_name(&self) -> &str {
        self.original_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.file_name)
    }
}

/// Parsed scalar fields of an applicant or job posting (`GET /details`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityDetail(pub Map<String, Value>);

impl EntityDetail {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

/// Raw agent evaluations for one match (`GET /match_details`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchDetail {
    #[serde(default)]
    pub recruiter_agent: Option<String>,
    #[serde(default)]
    pub hiring_manager_agent: Option<String>,
    #[serde(default)]
    pub portfolio_agent: Option<String>,
    #[serde(default)]
    pub technical_lead_agent: Option<String>,
    #[serde(default, deserialize_with = "deserialize_transcript")]
    pub debate_transcript: Vec<DebateEntry>,
    #[serde(default)]
    pub debate_winner: Option<String>,
}

/// Shapes a stored debate transcript may take on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTranscript {
    Entries(Vec<RawEntry>),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Tagged { source: String, text: String },
    /// `{"RecruiterAgent": "..."}`, the form the debate service stores.
    Keyed(Map<String, Value>),
    Other(Value),
}

impl From<RawEntry> for DebateEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Tagged { source, text } => DebateEntry { source, text },
            RawEntry::Keyed(map) if map.len() == 1 => {
                let (source, text) = map.into_iter().next().unwrap_or_default();
                DebateEntry {
                    source,
                    text: value_text(text),
                }
            }
            RawEntry::Keyed(map) => system_entry(Value::Object(map)),
            RawEntry::Other(value) => system_entry(value),
        }
    }
}

fn system_entry(value: Value) -> DebateEntry {
    DebateEntry {
        source: "system".to_string(),
        text: value_text(value),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn deserialize_transcript<'de, D>(deserializer: D) -> Result<Vec<DebateEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTranscript>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawTranscript::Entries(entries)) => entries.into_iter().map(Into::into).collect(),
        Some(RawTranscript::Text(text)) if text.trim().is_empty() => Vec::new(),
        Some(RawTranscript::Text(text)) => vec![system_entry(Value::String(text))],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_deserializes_status_payload() {
        let json = r#"{
            "id": "j_001",
            "file_path": "uploads/raw/job_postings/backend.pdf",
            "file_name": "backend.pdf",
            "original_name": null,
            "file_type": "job_posting",
            "status": "parsed",
            "uploaded_at": "2025-04-30 12:00:00"
        }"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.file_type, FileType::JobPosting);
        assert_eq!(entry.display_name(), "backend.pdf");
    }

    #[test]
    fn test_unknown_file_type_is_other() {
        let json = r#"{"id":"x","file_type":"cover_letter","file_name":"a","file_path":"b"}"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.file_type, FileType::Other);
    }

    #[test]
    fn test_entity_detail_name_must_be_a_string() {
        let detail: EntityDetail =
            serde_json::from_str(r#"{"name": "ADA LOVELACE", "skills": ["rust"]}"#).unwrap();
        assert_eq!(detail.name(), Some("ADA LOVELACE"));

        let detail: EntityDetail = serde_json::from_str(r#"{"name": 42}"#).unwrap();
        assert_eq!(detail.name(), None);
    }

    #[test]
    fn test_match_detail_with_tagged_transcript() {
        let json = r#"{
            "recruiter_agent": "1. **Fit Score**: 8/10",
            "hiring_manager_agent": "1. **Fit Score**: 4/10",
            "portfolio_agent": null,
            "debate_transcript": [
                {"source": "RecruiterAgent", "text": "Hire."},
                {"source": "HiringManagerAgent", "text": "Pass."}
            ],
            "debate_winner": "recruiteragent"
        }"#;
        let detail: MatchDetail = serde_json::from_str(json).unwrap();
        assert!(detail.portfolio_agent.is_none());
        assert!(detail.technical_lead_agent.is_none());
        assert_eq!(detail.debate_transcript.len(), 2);
        assert_eq!(detail.debate_transcript[1].source, "HiringManagerAgent");
        assert_eq!(detail.debate_winner.as_deref(), Some("recruiteragent"));
    }

    #[test]
    fn test_match_detail_with_keyed_transcript_entries() {
        let json = r#"{
            "debate_transcript": [{"RecruiterAgent": "Strong hire"}, 7]
        }"#;
        let detail: MatchDetail = serde_json::from_str(json).unwrap();
        assert_eq!(
            detail.debate_transcript,
            vec![
                DebateEntry {
                    source: "RecruiterAgent".to_string(),
                    text: "Strong hire".to_string()
                },
                DebateEntry {
                    source: "system".to_string(),
                    text: "7".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_match_detail_with_plain_text_or_null_transcript() {
        let detail: MatchDetail =
            serde_json::from_str(r#"{"debate_transcript": "raw dump"}"#).unwrap();
        assert_eq!(detail.debate_transcript[0].source, "system");
        assert_eq!(detail.debate_transcript[0].text, "raw dump");

        let detail: MatchDetail = serde_json::from_str(r#"{"debate_transcript": null}"#).unwrap();
        assert!(detail.debate_transcript.is_empty());
    }
}
