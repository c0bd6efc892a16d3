use std::collections::{HashMap, HashSet};
use std::time::Duration;
use itertools::Itertools;
use failure::Error;
use reqwest::Client;
use reqwest::header::{USER_AGENT, CONTENT_TYPE};
use mime::{Mime, APPLICATION, JSON};

use super::config::Rtd;
use super::error::CollectorError;

/// The `videos` endpoint rejects requests for more than 50 IDs at once.
pub const MAX_IDS_PER_REQUEST: usize = 50;

// snippet: title, channel, upload date
// statistics: view/like/comment counts
// contentDetails: duration
const PART_FIELDS: &str = "snippet,statistics,contentDetails";

pub const TEXT_PLACEHOLDER: &str = "N/A";
pub const COUNT_PLACEHOLDER: &str = "0";
const NOT_FOUND_ERROR: &str = "Video not found (may be deleted or private)";

// Response structure of the `videos` list endpoint; fields the report
// doesn't use are left out and ignored during decoding.
#[derive(Debug, Clone, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Option<Snippet>,
    statistics: Option<Statistics>,
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Snippet {
    title: Option<String>,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "commentCount")]
    comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

/// Metric fields for one video, as strings straight from the API.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetrics {
    pub title: String,
    pub channel_name: String,
    pub upload_date: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub duration: String,
}

impl VideoMetrics {
    pub fn placeholder() -> VideoMetrics {
        VideoMetrics {
            title: TEXT_PLACEHOLDER.to_string(),
            channel_name: TEXT_PLACEHOLDER.to_string(),
            upload_date: TEXT_PLACEHOLDER.to_string(),
            view_count: COUNT_PLACEHOLDER.to_string(),
            like_count: COUNT_PLACEHOLDER.to_string(),
            comment_count: COUNT_PLACEHOLDER.to_string(),
            duration: TEXT_PLACEHOLDER.to_string(),
        }
    }
}

/// Classification of one requested video ID: the API returned data for
/// it, the API silently omitted it, or the whole chunk request failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found(VideoMetrics),
    NotFound,
    Failed(String),
}

impl Outcome {
    /// Split an outcome into its data fields and the error column value.
    /// The fields are placeholders exactly when the error is non-empty.
    pub fn into_fields(self) -> (VideoMetrics, String) {
        match self {
            Outcome::Found(metrics) => (metrics, String::new()),
            Outcome::NotFound => (VideoMetrics::placeholder(), NOT_FOUND_ERROR.to_string()),
            Outcome::Failed(message) => (VideoMetrics::placeholder(), message),
        }
    }
}

/// Retrieve metrics for the given video IDs, `MAX_IDS_PER_REQUEST` per
/// API call. Every input ID ends up with exactly one outcome; a failed
/// chunk degrades its IDs to `Failed` outcomes and the run carries on
/// with the next chunk.
pub fn fetch_video_metrics(
    ids: &[String], api_key: &str, rtd: &Rtd
) -> Result<HashMap<String, Outcome>, Error> {
    let client = Client::builder()
        .timeout(Duration::from_secs(rtd.conf.params.timeout_s))
        .build()?;

    let mut results = HashMap::new();
    for batch in ids.chunks(MAX_IDS_PER_REQUEST) {
        if rtd.args.flag_verbose {
            println!("Requesting a batch of {} videos", batch.len());
        }
        match request_batch(&client, rtd, api_key, batch) {
            Ok(items) => absorb_items(batch, items, &mut results),
            Err(err) => {
                eprintln!("Error retrieving batch: {}", err);
                absorb_failure(batch, &err.to_string(), &mut results);
            },
        }
    }
    Ok(results)
}

fn request_batch(
    client: &Client, rtd: &Rtd, api_key: &str, batch: &[String]
) -> Result<Vec<VideoItem>, Error> {
    let id_list = batch.iter().join(",");
    let mut resp = client.get(rtd.conf.params.api_endpoint.as_str())
        .header(USER_AGENT, rtd.conf.params.user_agent.as_str())
        .query(&[
            ("part", PART_FIELDS),
            ("id", id_list.as_str()),
            ("key", api_key),
        ])
        .send()?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_else(|_| String::new());
        return Err(CollectorError::new(format!("API Error: {} - {}", status, body)).into());
    }

    let content_type = resp.headers().get(CONTENT_TYPE)
        .and_then(|typ| typ.to_str().ok())
        .and_then(|typ| typ.parse::<Mime>().ok());

    match content_type {
        Some(mime) => {
            match (mime.type_(), mime.subtype()) {
                (APPLICATION, JSON) => (),
                mime => {
                    return Err(CollectorError::new(format!("Expected application/json mime type but got {:?}", mime)).into());
                }
            }
        },
        None => {
            return Err(CollectorError::new("Expected application/json mime type but did not get a mime type".into()).into());
        }
    };

    let parsed: VideoListResponse = resp.json()?;
    Ok(parsed.items)
}

fn absorb_items(batch: &[String], items: Vec<VideoItem>, results: &mut HashMap<String, Outcome>) {
    let returned: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();
    for item in items {
        let id = item.id.clone();
        results.insert(id, Outcome::Found(metrics_from_item(item)));
    }
    // The API silently omits deleted, private, and nonexistent videos.
    for id in batch {
        if !returned.contains(id) {
            results.insert(id.clone(), Outcome::NotFound);
        }
    }
}

fn absorb_failure(batch: &[String], message: &str, results: &mut HashMap<String, Outcome>) {
    for id in batch {
        if !results.contains_key(id) {
            results.insert(id.clone(), Outcome::Failed(message.to_string()));
        }
    }
}

fn metrics_from_item(item: VideoItem) -> VideoMetrics {
    let snippet = item.snippet.unwrap_or_default();
    let statistics = item.statistics.unwrap_or_default();
    let content_details = item.content_details.unwrap_or_default();
    VideoMetrics {
        title: snippet.title.unwrap_or_else(|| TEXT_PLACEHOLDER.to_string()),
        channel_name: snippet.channel_title.unwrap_or_else(|| TEXT_PLACEHOLDER.to_string()),
        upload_date: snippet.published_at.unwrap_or_else(|| TEXT_PLACEHOLDER.to_string()),
        view_count: statistics.view_count.unwrap_or_else(|| COUNT_PLACEHOLDER.to_string()),
        like_count: statistics.like_count.unwrap_or_else(|| COUNT_PLACEHOLDER.to_string()),
        comment_count: statistics.comment_count.unwrap_or_else(|| COUNT_PLACEHOLDER.to_string()),
        duration: content_details.duration.unwrap_or_else(|| TEXT_PLACEHOLDER.to_string()),
    }
}
