//! Video record representation.

use serde_json::Value;

/// A downloadable entry from one of the export's video lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    /// Video URL as written in the export.
    pub link: String,

    /// Timestamp in `YYYY-MM-DD HH:MM:SS` form.
    pub date: String,
}

impl VideoRecord {
    /// Build a record from a raw export entry.
    ///
    /// Returns `None` unless both `Link` and `Date` are non-empty strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let link = non_empty_str(value, "Link")?;
        let date = non_empty_str(value, "Date")?;

        Some(Self {
            link: link.to_string(),
            date: date.to_string(),
        })
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_record() {
        let value = json!({"Link": "https://vm.tiktok.com/ABC", "Date": "2025-01-14 04:36:07"});
        let record = VideoRecord::from_value(&value).unwrap();
        assert_eq!(record.link, "https://vm.tiktok.com/ABC");
        assert_eq!(record.date, "2025-01-14 04:36:07");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let value = json!({
            "Link": "https://vm.tiktok.com/ABC",
            "Date": "2025-01-14 04:36:07",
            "Likes": "12"
        });
        assert!(VideoRecord::from_value(&value).is_some());
    }

    #[test]
    fn test_missing_or_empty_fields() {
        assert!(VideoRecord::from_value(&json!({"Link": "https://vm.tiktok.com/ABC"})).is_none());
        assert!(VideoRecord::from_value(&json!({"Date": "2025-01-14 04:36:07"})).is_none());
        assert!(VideoRecord::from_value(&json!({"Link": "", "Date": "2025-01-14"})).is_none());
        assert!(VideoRecord::from_value(&json!({"Link": "x", "Date": ""})).is_none());
    }

    #[test]
    fn test_non_string_fields() {
        assert!(VideoRecord::from_value(&json!({"Link": 42, "Date": "2025-01-14"})).is_none());
        assert!(VideoRecord::from_value(&json!(["Link", "Date"])).is_none());
        assert!(VideoRecord::from_value(&Value::Null).is_none());
    }
}
