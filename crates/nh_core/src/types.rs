use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One curated article as served by the backend. List responses carry only
/// the card projection, so everything beyond it is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub quick_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    pub author_name: String,
    pub publisher_name: String,
    pub publisher_logo: String,
    pub cover_image: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_posted: DateTime<Utc>,
    pub category: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}

impl Article {
    /// Richest summary available: the detailed one, the quick blurb otherwise.
    /// The reader body and the chat context both build on this.
    pub fn summary(&self) -> &str {
        self.detailed_summary
            .as_deref()
            .unwrap_or(&self.quick_summary)
    }

    /// Original article text, empty when the backend has none.
    pub fn content(&self) -> &str {
        self.original_content.as_deref().unwrap_or("")
    }

    pub fn published_ago(&self) -> String {
        self.published_ago_at(Utc::now())
    }

    /// "2 hours ago" style distance from `now` to the publish time.
    pub fn published_ago_at(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.date_posted);
        if elapsed < Duration::minutes(1) {
            return "just now".to_string();
        }
        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();
        if minutes < 60 {
            plural(minutes, "minute")
        } else if hours < 24 {
            plural(hours, "hour")
        } else if days < 7 {
            plural(days, "day")
        } else if days < 30 {
            plural(days / 7, "week")
        } else if days < 365 {
            plural(days / 30, "month")
        } else {
            plural(days / 365, "year")
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Publish times arrive either as full RFC3339 or as the backend's bare
/// ISO-8601 form with no offset. Bare stamps are read as UTC.
fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|stamp| stamp.with_timezone(&Utc))
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One transcript entry. Lives only in a chat session's memory; the wire
/// never sees the id or the synthetic flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub author: Author,
    /// Client-side greeting, excluded from every history payload.
    pub synthetic: bool,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    pub fn to_history_entry(&self) -> ChatHistoryEntry {
        ChatHistoryEntry {
            text: self.text.clone(),
            is_user: self.is_user(),
        }
    }
}

/// Wire-level reduction of a transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryEntry {
    pub text: String,
    pub is_user: bool,
}

/// Body of `POST /api/chat`: article context, prior turns, new message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPrompt {
    pub article_id: String,
    pub article_title: String,
    pub article_summary: String,
    pub article_content: String,
    pub history: Vec<ChatHistoryEntry>,
    pub message: String,
}

/// Outcome of `POST /api/sync`. The backend omits the counters when it had
/// nothing to fetch, hence the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub fetched_from_api: u32,
    #[serde(default)]
    pub ai_selected: u32,
    #[serde(default)]
    pub new_in_db: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article_json_card() -> &'static str {
        r#"{
            "id": "abc123",
            "title": "Test Article",
            "quickSummary": "A short take.",
            "authorName": "Jane Doe",
            "publisherName": "TechWire",
            "publisherLogo": "https://img.example/t.png",
            "coverImage": "https://img.example/cover.jpg",
            "datePosted": "2026-08-20T12:00:00+00:00",
            "category": "AI",
            "sourceUrl": "https://example.com/story"
        }"#
    }

    #[test]
    fn card_projection_deserializes_without_detail_fields() {
        let article: Article = serde_json::from_str(article_json_card()).unwrap();
        assert_eq!(article.id, "abc123");
        assert_eq!(article.quick_summary, "A short take.");
        assert!(article.detailed_summary.is_none());
        assert!(article.why_it_matters.is_none());
        assert!(article.original_content.is_none());
    }

    #[test]
    fn full_article_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "abc123",
            "title": "Test Article",
            "quickSummary": "A short take.",
            "detailedSummary": "Long form.\n\nSecond paragraph.",
            "whyItMatters": "Because reasons.",
            "authorName": "Jane Doe",
            "publisherName": "TechWire",
            "publisherLogo": "https://img.example/t.png",
            "coverImage": "https://img.example/cover.jpg",
            "datePosted": "2026-08-20T12:00:00+00:00",
            "category": "AI",
            "sourceUrl": "https://example.com/story",
            "originalContent": "The original text."
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.detailed_summary.as_deref(), Some("Long form.\n\nSecond paragraph."));
        assert_eq!(article.why_it_matters.as_deref(), Some("Because reasons."));
        assert_eq!(article.content(), "The original text.");
    }

    #[test]
    fn date_posted_parses_with_and_without_an_offset() {
        let posted = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();
        let cases = [
            ("2026-08-20T12:00:00+00:00", posted),
            ("2026-08-20T12:00:00Z", posted),
            ("2026-08-20T12:00:00", posted),
            ("2026-08-20T12:00:00.123000", posted + Duration::microseconds(123_000)),
        ];
        for (raw, expected) in cases {
            let json = article_json_card().replace("2026-08-20T12:00:00+00:00", raw);
            let article: Article = serde_json::from_str(&json).unwrap();
            assert_eq!(article.date_posted, expected, "raw {}", raw);
        }
    }

    #[test]
    fn an_unreadable_date_is_still_a_decode_error() {
        let json = article_json_card().replace("2026-08-20T12:00:00+00:00", "yesterday");
        assert!(serde_json::from_str::<Article>(&json).is_err());
    }

    #[test]
    fn summary_prefers_detailed_and_falls_back_to_quick() {
        let mut article: Article = serde_json::from_str(article_json_card()).unwrap();
        assert_eq!(article.summary(), "A short take.");
        article.detailed_summary = Some("Long form.".to_string());
        assert_eq!(article.summary(), "Long form.");
    }

    #[test]
    fn content_defaults_to_empty_string() {
        let article: Article = serde_json::from_str(article_json_card()).unwrap();
        assert_eq!(article.content(), "");
    }

    #[test]
    fn history_entry_serializes_is_user_as_camel_case() {
        let entry = ChatHistoryEntry {
            text: "What happened?".to_string(),
            is_user: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "What happened?", "isUser": true }));
    }

    #[test]
    fn chat_prompt_serializes_full_camel_case_body() {
        let prompt = ChatPrompt {
            article_id: "abc123".to_string(),
            article_title: "Test Article".to_string(),
            article_summary: "A short take.".to_string(),
            article_content: String::new(),
            history: vec![ChatHistoryEntry {
                text: "Hi".to_string(),
                is_user: true,
            }],
            message: "And then?".to_string(),
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "articleId": "abc123",
                "articleTitle": "Test Article",
                "articleSummary": "A short take.",
                "articleContent": "",
                "history": [{ "text": "Hi", "isUser": true }],
                "message": "And then?"
            })
        );
    }

    #[test]
    fn sync_report_tolerates_the_degenerate_shape() {
        let report: SyncReport =
            serde_json::from_str(r#"{ "message": "No articles fetched from NewsAPI.", "fetched": 0, "new": 0 }"#)
                .unwrap();
        assert_eq!(report.fetched_from_api, 0);
        assert_eq!(report.message, "No articles fetched from NewsAPI.");

        let report: SyncReport = serde_json::from_str(
            r#"{ "fetched_from_api": 40, "ai_selected": 10, "new_in_db": 7, "message": "ok" }"#,
        )
        .unwrap();
        assert_eq!(report.fetched_from_api, 40);
        assert_eq!(report.new_in_db, 7);
    }

    #[test]
    fn published_ago_buckets() {
        let posted = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();
        let mut article: Article = serde_json::from_str(article_json_card()).unwrap();
        article.date_posted = posted;

        let cases = [
            (Duration::seconds(20), "just now"),
            (Duration::minutes(1), "1 minute ago"),
            (Duration::minutes(45), "45 minutes ago"),
            (Duration::hours(1), "1 hour ago"),
            (Duration::hours(5), "5 hours ago"),
            (Duration::days(1), "1 day ago"),
            (Duration::days(3), "3 days ago"),
            (Duration::days(14), "2 weeks ago"),
            (Duration::days(90), "3 months ago"),
            (Duration::days(800), "2 years ago"),
        ];
        for (offset, expected) in cases {
            assert_eq!(article.published_ago_at(posted + offset), expected, "offset {:?}", offset);
        }
    }
}
