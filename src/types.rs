use chrono::{DateTime, NaiveDateTime};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata entry name carrying the last-modified timestamp.
pub const LAST_MODIFIED_KEY: &str = "cq:lastModified";

/// One content fragment as returned by the persisted query.
///
/// Decoding never fails on a bad field: anything of the wrong shape falls
/// back to its default so one malformed fragment cannot sink a whole render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageRef>,
    #[serde(rename = "locationTag", default, deserialize_with = "lenient_tags")]
    pub location_tag: Vec<String>,
    #[serde(rename = "_metadata", default, deserialize_with = "lenient")]
    pub metadata: Option<ItemMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Plain(String),
    Rich(RichText),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default, deserialize_with = "lenient")]
    pub plaintext: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub html: Option<String>,
}

impl Description {
    pub fn plain_text(&self) -> &str {
        match self {
            Description::Plain(s) => s,
            Description::Rich(r) => r.plaintext.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "_path", default, deserialize_with = "lenient")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(rename = "calendarMetadata", default, deserialize_with = "lenient_entries")]
    pub calendar_metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl ContentItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(Description::Plain(text.into()));
        self
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image = Some(ImageRef { path: Some(path.into()) });
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_tag = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_last_modified(mut self, value: impl Into<String>) -> Self {
        let entry = MetadataEntry { name: LAST_MODIFIED_KEY.to_string(), value: Value::String(value.into()) };
        self.metadata.get_or_insert_with(ItemMetadata::default).calendar_metadata.push(entry);
        self
    }

    pub fn description_text(&self) -> &str {
        self.description.as_ref().map(Description::plain_text).unwrap_or("")
    }

    pub fn image_path(&self) -> &str {
        self.image.as_ref().and_then(|i| i.path.as_deref()).unwrap_or("")
    }

    /// Last-modified instant in epoch milliseconds, if present and parseable.
    pub fn last_modified(&self) -> Option<i64> {
        let meta = self.metadata.as_ref()?;
        let entry = meta.calendar_metadata.iter().find(|m| m.name == LAST_MODIFIED_KEY)?;
        match &entry.value {
            Value::String(s) => parse_timestamp(s),
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Sort key: missing timestamps collapse to the epoch.
    pub fn last_modified_or_epoch(&self) -> i64 {
        self.last_modified().unwrap_or(0)
    }
}

/// Parse an RFC 3339 timestamp (or a zone-less ISO one, read as UTC) into epoch millis.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|n| n.and_utc().timestamp_millis())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let v = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(v).unwrap_or_default())
}

// Keeps the string entries of a list; anything that is not a list yields no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Array(items) => items.into_iter().filter_map(|t| t.as_str().map(str::to_string)).collect(),
        _ => Vec::new(),
    })
}

// Decodes entries one by one so a malformed sibling cannot hide a good one.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<MetadataEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Array(items) => items.into_iter().filter_map(|e| serde_json::from_value(e).ok()).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_fragment() {
        let v = json!({
            "title": "Colombo",
            "description": { "plaintext": "Beaches", "html": "<p>Beaches</p>" },
            "image": { "_path": "/content/dam/colombo.jpg" },
            "locationTag": ["region:Delhi", "region:Chennai"],
            "_metadata": { "calendarMetadata": [
                { "name": "cq:lastReplicated", "value": "2024-01-01T00:00:00.000Z" },
                { "name": "cq:lastModified", "value": "2024-03-05T10:00:00.000Z" }
            ]}
        });
        let item: ContentItem = serde_json::from_value(v).unwrap();
        assert_eq!(item.title, "Colombo");
        assert_eq!(item.description_text(), "Beaches");
        assert_eq!(item.image_path(), "/content/dam/colombo.jpg");
        assert_eq!(item.location_tag.len(), 2);
        assert_eq!(item.last_modified(), parse_timestamp("2024-03-05T10:00:00Z"));
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let v = json!({
            "title": 42,
            "description": 17,
            "image": "bare-string",
            "locationTag": "region:Delhi",
            "_metadata": { "calendarMetadata": "oops" }
        });
        let item: ContentItem = serde_json::from_value(v).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.description_text(), "");
        assert_eq!(item.image_path(), "");
        assert!(item.location_tag.is_empty());
        assert_eq!(item.last_modified(), None);
        assert_eq!(item.last_modified_or_epoch(), 0);
    }

    #[test]
    fn malformed_metadata_entry_does_not_hide_last_modified() {
        let v = json!({
            "_metadata": { "calendarMetadata": [
                { "value": "2020-01-01T00:00:00Z" },
                { "name": 12, "value": "2021-01-01T00:00:00Z" },
                "junk",
                { "name": "cq:lastModified", "value": "2024-03-05T10:00:00.000Z" }
            ]}
        });
        let item: ContentItem = serde_json::from_value(v).unwrap();
        assert_eq!(item.metadata.as_ref().map(|m| m.calendar_metadata.len()), Some(1));
        assert_eq!(item.last_modified(), parse_timestamp("2024-03-05T10:00:00Z"));
    }

    #[test]
    fn plain_string_description() {
        let item: ContentItem = serde_json::from_value(json!({ "description": "Just text" })).unwrap();
        assert_eq!(item.description_text(), "Just text");
    }

    #[test]
    fn non_string_tags_are_dropped() {
        let item: ContentItem = serde_json::from_value(json!({ "locationTag": ["city:Kandy", 7, null] })).unwrap();
        assert_eq!(item.location_tag, vec!["city:Kandy".to_string()]);
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp("1970-01-01T00:00:01.500"), Some(1500));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn builder_sets_last_modified() {
        let item = ContentItem::new("x").with_last_modified("2020-01-01T00:00:00Z");
        assert_eq!(item.last_modified(), parse_timestamp("2020-01-01T00:00:00Z"));
    }
}
