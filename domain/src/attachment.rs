/// An image split out of a `data:` URI, ready to inline into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: &'static str,
    pub data: String,
}

impl ImageAttachment {
    /// JPEG when the URI says so, PNG otherwise. The payload is whatever
    /// follows the first comma; input without a comma is taken as a bare
    /// base64 payload.
    pub fn from_data_uri(uri: &str) -> Self {
        let mime_type = if uri.starts_with("data:image/jpeg") {
            "image/jpeg"
        } else {
            "image/png"
        };
        let data = match uri.split_once(',') {
            Some((_, payload)) => payload,
            None => uri,
        };
        Self {
            mime_type,
            data: data.to_string(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
