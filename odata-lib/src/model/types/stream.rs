//! Stream reference values

use url::Url;

/// A reference to a media resource or a named stream property.
///
/// Links left as `None` on the wire are filled in by the metadata builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamReference {
    /// Link used to change the stream content.
    pub edit_link: Option<Url>,
    /// Link used to read the stream content.
    pub read_link: Option<Url>,
    /// MIME type of the stream content.
    pub content_type: Option<String>,
    /// ETag of the stream content.
    pub etag: Option<String>,
}

impl StreamReference {
    /// Creates an empty stream reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edit link.
    pub fn with_edit_link(mut self, link: Url) -> Self {
        self.edit_link = Some(link);
        self
    }

    /// Sets the read link.
    pub fn with_read_link(mut self, link: Url) -> Self {
        self.read_link = Some(link);
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
