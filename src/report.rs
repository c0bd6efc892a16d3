use std::collections::HashMap;

use super::http::Outcome;
use super::table::VideoRecord;

/// One output row: the input identity fields joined with the fetched
/// metrics for that video ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub nickname: String,
    pub title: String,
    pub channel_name: String,
    pub upload_date: String,
    pub url: String,
    pub video_id: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub duration: String,
    pub error: String,
}

/// Join fetch outcomes with the original input rows and sort by upload
/// date for easier reading. The sort is a plain string comparison, so
/// placeholder "N/A" dates interleave lexically with real timestamps.
pub fn build_report(
    videos_by_id: &HashMap<String, VideoRecord>,
    outcomes: HashMap<String, Outcome>,
) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = outcomes.into_iter()
        .map(|(video_id, outcome)| {
            let (metrics, error) = outcome.into_fields();
            let (nickname, url) = match videos_by_id.get(&video_id) {
                Some(video) => (video.nickname.clone(), video.url.clone()),
                // shouldn't happen: every fetched ID came from a record
                None => ("N/A".to_string(), "N/A".to_string()),
            };
            ReportRow {
                nickname,
                title: metrics.title,
                channel_name: metrics.channel_name,
                upload_date: metrics.upload_date,
                url,
                video_id,
                view_count: metrics.view_count,
                like_count: metrics.like_count,
                comment_count: metrics.comment_count,
                duration: metrics.duration,
                error,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.upload_date.cmp(&b.upload_date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::VideoMetrics;

    fn record(nickname: &str, url: &str) -> VideoRecord {
        VideoRecord {
            nickname: nickname.to_string(),
            url: url.to_string(),
        }
    }

    fn metrics(upload_date: &str) -> VideoMetrics {
        VideoMetrics {
            title: "A title".to_string(),
            channel_name: "A channel".to_string(),
            upload_date: upload_date.to_string(),
            view_count: "1000".to_string(),
            like_count: "100".to_string(),
            comment_count: "10".to_string(),
            duration: "PT3M14S".to_string(),
        }
    }

    #[test]
    fn joins_identity_fields_with_metrics() {
        let mut videos_by_id = HashMap::new();
        videos_by_id.insert(
            "abc123".to_string(),
            record("Alice", "https://www.youtube.com/watch?v=abc123"),
        );
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "abc123".to_string(),
            Outcome::Found(metrics("2025-03-14T09:26:53Z")),
        );

        let rows = build_report(&videos_by_id, outcomes);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.nickname, "Alice");
        assert_eq!(row.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(row.video_id, "abc123");
        assert_eq!(row.title, "A title");
        assert_eq!(row.view_count, "1000");
        assert_eq!(row.error, "");
    }

    #[test]
    fn missing_videos_keep_their_row_with_placeholders() {
        let mut videos_by_id = HashMap::new();
        videos_by_id.insert(
            "xyz789".to_string(),
            record("Bob", "https://youtu.be/xyz789"),
        );
        let mut outcomes = HashMap::new();
        outcomes.insert("xyz789".to_string(), Outcome::NotFound);

        let rows = build_report(&videos_by_id, outcomes);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.nickname, "Bob");
        assert_eq!(row.url, "https://youtu.be/xyz789");
        assert_eq!(row.title, "N/A");
        assert_eq!(row.upload_date, "N/A");
        assert_eq!(row.view_count, "0");
        assert_eq!(row.error, "Video not found (may be deleted or private)");
    }

    #[test]
    fn unknown_ids_fall_back_to_placeholder_identity() {
        let videos_by_id = HashMap::new();
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "orphan".to_string(),
            Outcome::Found(metrics("2025-03-14T09:26:53Z")),
        );

        let rows = build_report(&videos_by_id, outcomes);
        assert_eq!(rows[0].nickname, "N/A");
        assert_eq!(rows[0].url, "N/A");
    }

    #[test]
    fn rows_sort_by_upload_date_string() {
        let mut videos_by_id = HashMap::new();
        videos_by_id.insert("a".to_string(), record("Alice", "https://youtu.be/a"));
        videos_by_id.insert("b".to_string(), record("Bob", "https://youtu.be/b"));
        videos_by_id.insert("c".to_string(), record("Carol", "https://youtu.be/c"));

        let mut outcomes = HashMap::new();
        outcomes.insert("a".to_string(), Outcome::Found(metrics("2025-06-01T00:00:00Z")));
        outcomes.insert("b".to_string(), Outcome::Found(metrics("2024-12-31T23:59:59Z")));
        // placeholder "N/A" sorts lexically after the digit-led timestamps
        outcomes.insert("c".to_string(), Outcome::NotFound);

        let rows = build_report(&videos_by_id, outcomes);
        let dates: Vec<&str> = rows.iter().map(|row| row.upload_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-12-31T23:59:59Z", "2025-06-01T00:00:00Z", "N/A"]);
    }
}
