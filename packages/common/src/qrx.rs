use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A single news line attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewsItem {
    pub text: String,
    /// RFC 3339 timestamp as stored by the authoring app.
    #[serde(rename = "createdAt")]
    #[schema(example = "2025-05-01T12:30:00Z")]
    pub created_at: String,
}

impl NewsItem {
    /// Human-readable timestamp, or the raw value when it does not parse.
    pub fn created_at_display(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => ts.format("%d.%m.%Y, %H:%M").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// A row of `qr_x_entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Entry {
    #[schema(example = "abc123")]
    pub id: String,
    #[serde(default)]
    pub owner_user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display order is insertion order; a `null` column reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Entry {
    /// Description with surrounding whitespace removed, `None` when blank.
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn location_text(&self) -> Option<&str> {
        non_blank(self.location_name.as_deref())
    }

    /// Both coordinates, or nothing. A half-filled pair is treated as absent.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn logo(&self) -> Option<&str> {
        non_blank(self.logo_url.as_deref())
    }
}

/// Classification of a media row. The column is free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    File,
    Other,
}

impl MediaKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "image" => Self::Image,
            "file" => Self::File,
            _ => Self::Other,
        }
    }
}

/// A row of `qr_x_media`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Media {
    pub id: String,
    /// Owning entry. Not verified against `qr_x_entries`.
    pub qrx_id: String,
    #[serde(rename = "type")]
    #[schema(example = "image")]
    pub kind: String,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub bytes: Option<i64>,
}

impl Media {
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_tag(&self.kind)
    }
}

/// Media split into the two display buckets.
///
/// Rows of any other kind are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaBuckets {
    pub images: Vec<Media>,
    pub files: Vec<Media>,
}

impl MediaBuckets {
    pub fn partition(media: Vec<Media>) -> Self {
        let mut buckets = Self::default();
        for item in media {
            match item.media_kind() {
                MediaKind::Image => buckets.images.push(item),
                MediaKind::File => buckets.files.push(item),
                MediaKind::Other => {
                    tracing::debug!(media_id = %item.id, kind = %item.kind, "Skipping media of unknown kind");
                }
            }
        }
        buckets
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
