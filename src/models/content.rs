//! Post content variants and their normalized rendering form.

use serde::{Deserialize, Serialize};

/// A single media attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Image {
        url: String,
    },
    Video {
        url: String,
        #[serde(rename = "thumbnailUrl")]
        thumbnail_url: String,
    },
}

impl MediaItem {
    /// URL of the underlying media resource.
    pub fn url(&self) -> &str {
        match self {
            MediaItem::Image { url } | MediaItem::Video { url, .. } => url,
        }
    }
}

/// What a post carries.
///
/// Rendering never matches on this directly; it consumes the
/// [`RenderedContent`] returned by [`PostContent::rendered`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostContent {
    Text {
        body: String,
    },
    Image {
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Video {
        url: String,
        #[serde(rename = "thumbnailUrl")]
        thumbnail_url: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Mixed {
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        media: Vec<MediaItem>,
    },
}

/// Normalized `(text, media)` pair derived from a [`PostContent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    pub text: Option<String>,
    pub media: Vec<MediaItem>,
}

impl RenderedContent {
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

impl PostContent {
    pub fn text(body: impl Into<String>) -> Self {
        PostContent::Text { body: body.into() }
    }

    pub fn image(url: impl Into<String>, caption: Option<String>) -> Self {
        PostContent::Image {
            url: url.into(),
            caption,
        }
    }

    pub fn video(
        url: impl Into<String>,
        thumbnail_url: impl Into<String>,
        caption: Option<String>,
    ) -> Self {
        PostContent::Video {
            url: url.into(),
            thumbnail_url: thumbnail_url.into(),
            caption,
        }
    }

    pub fn mixed(body: Option<String>, media: Vec<MediaItem>) -> Self {
        PostContent::Mixed { body, media }
    }

    /// Derive the normalized text and media list for this content.
    pub fn rendered(&self) -> RenderedContent {
        match self {
            PostContent::Text { body } => RenderedContent {
                text: Some(body.clone()),
                media: Vec::new(),
            },
            PostContent::Image { url, caption } => RenderedContent {
                text: caption.clone(),
                media: vec![MediaItem::Image { url: url.clone() }],
            },
            PostContent::Video {
                url,
                thumbnail_url,
                caption,
            } => RenderedContent {
                text: caption.clone(),
                media: vec![MediaItem::Video {
                    url: url.clone(),
                    thumbnail_url: thumbnail_url.clone(),
                }],
            },
            PostContent::Mixed { body, media } => RenderedContent {
                text: body.clone(),
                media: media.clone(),
            },
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PostContent::Text { .. } => "text",
            PostContent::Image { .. } => "image",
            PostContent::Video { .. } => "video",
            PostContent::Mixed { .. } => "mixed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_renders_body_without_media() {
        let rendered = PostContent::text("hello #rust").rendered();
        assert_eq!(rendered.text.as_deref(), Some("hello #rust"));
        assert!(!rendered.has_media());
    }

    #[test]
    fn test_image_renders_caption_and_single_image() {
        let rendered =
            PostContent::image("https://cdn.test/a.png", Some("sunset".to_string())).rendered();
        assert_eq!(rendered.text.as_deref(), Some("sunset"));
        assert_eq!(
            rendered.media,
            vec![MediaItem::Image {
                url: "https://cdn.test/a.png".to_string()
            }]
        );
    }

    #[test]
    fn test_image_without_caption_has_no_text() {
        let rendered = PostContent::image("https://cdn.test/a.png", None).rendered();
        assert!(rendered.text.is_none());
        assert_eq!(rendered.media.len(), 1);
    }

    #[test]
    fn test_video_renders_thumbnail() {
        let rendered =
            PostContent::video("https://cdn.test/v.mp4", "https://cdn.test/v.jpg", None).rendered();
        assert!(rendered.text.is_none());
        match &rendered.media[0] {
            MediaItem::Video { url, thumbnail_url } => {
                assert_eq!(url, "https://cdn.test/v.mp4");
                assert_eq!(thumbnail_url, "https://cdn.test/v.jpg");
            }
            other => panic!("Expected video, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_preserves_media_order() {
        let media = vec![
            MediaItem::Image {
                url: "1".to_string(),
            },
            MediaItem::Video {
                url: "2".to_string(),
                thumbnail_url: "2t".to_string(),
            },
            MediaItem::Image {
                url: "3".to_string(),
            },
        ];
        let rendered = PostContent::mixed(Some("gallery".to_string()), media.clone()).rendered();
        assert_eq!(rendered.text.as_deref(), Some("gallery"));
        assert_eq!(rendered.media, media);
        let urls: Vec<&str> = rendered.media.iter().map(MediaItem::url).collect();
        assert_eq!(urls, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_content_json_tagging() {
        let json = r#"{"type":"video","url":"v","thumbnailUrl":"t"}"#;
        let content: PostContent = serde_json::from_str(json).unwrap();
        assert_eq!(content, PostContent::video("v", "t", None));
        assert_eq!(content.kind(), "video");

        let json = r#"{"type":"mixed","media":[{"type":"image","url":"i"}]}"#;
        let content: PostContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.kind(), "mixed");
        assert_eq!(content.rendered().media.len(), 1);
        assert!(content.rendered().text.is_none());
    }

    #[test]
    fn test_unknown_content_type_rejected() {
        let json = r#"{"type":"poll","options":[]}"#;
        assert!(serde_json::from_str::<PostContent>(json).is_err());
    }
}
