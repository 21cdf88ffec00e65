mod content;
mod post;
mod status;

pub use content::{MediaItem, PostContent, RenderedContent};
pub use post::{FeedPage, Post, User};
pub use status::FeedStatus;

use serde::Deserializer;

/// Number of posts requested per page.
///
/// A page returning fewer posts than this is treated as the last page.
pub const PAGE_SIZE: usize = 20;

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    #[test]
    fn test_deserialize_id_from_string() {
        let parsed: WithId = serde_json::from_str(r#"{"id":"post-1"}"#).unwrap();
        assert_eq!(parsed.id, "post-1");
    }

    #[test]
    fn test_deserialize_id_from_integer() {
        let parsed: WithId = serde_json::from_str(r#"{"id":1234567890123}"#).unwrap();
        assert_eq!(parsed.id, "1234567890123");
    }

    #[test]
    fn test_deserialize_id_rejects_bool() {
        assert!(serde_json::from_str::<WithId>(r#"{"id":true}"#).is_err());
    }

    #[test]
    fn test_page_size() {
        assert_eq!(PAGE_SIZE, 20);
    }
}
