use std::fmt;
use std::path::Path;

use mime_guess::Mime;
use serde::Serialize;

/// Coarse kind of a file, derived from its MIME type.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
    Text,
    Pdf,
    Generic,
}

/// Whether a served file is rendered by the browser or saved.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Inline,
    Attachment,
}

/// Guess a MIME type from the file name only; content is never inspected.
pub fn guess_mime(path: &Path) -> Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

impl MediaCategory {
    pub fn from_mime(mime: &Mime) -> Self {
        match mime.type_().as_str() {
            "image" => MediaCategory::Image,
            "video" => MediaCategory::Video,
            "audio" => MediaCategory::Audio,
            "text" => MediaCategory::Text,
            _ if mime.essence_str().contains("pdf") => MediaCategory::Pdf,
            _ => MediaCategory::Generic,
        }
    }

    /// Image, video and audio are the kinds a browser plays in place.
    pub fn is_renderable(self) -> bool {
        matches!(
            self,
            MediaCategory::Image | MediaCategory::Video | MediaCategory::Audio
        )
    }
}

impl Disposition {
    pub fn for_mime(mime: &Mime) -> Self {
        if MediaCategory::from_mime(mime).is_renderable() {
            Disposition::Inline
        } else {
            Disposition::Attachment
        }
    }

    /// `Content-Disposition` header value for `file_name`.
    ///
    /// Carries an ASCII `filename` fallback and, when the name is not plain
    /// ASCII, an RFC 5987 `filename*` with the exact name.
    pub fn header_value(self, file_name: &str) -> String {
        let fallback: String = file_name
            .chars()
            .map(|c| match c {
                '"' => '\'',
                '\\' => '_',
                c if c.is_ascii() && !c.is_ascii_control() => c,
                _ => '_',
            })
            .collect();

        if fallback == file_name {
            format!("{}; filename=\"{}\"", self, fallback)
        } else {
            format!(
                "{}; filename=\"{}\"; filename*=UTF-8''{}",
                self,
                fallback,
                urlencoding::encode(file_name)
            )
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Inline => f.write_str("inline"),
            Disposition::Attachment => f.write_str("attachment"),
        }
    }
}
