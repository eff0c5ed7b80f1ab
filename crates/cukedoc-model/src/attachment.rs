//! Attachment externalization: MIME types, per-run file naming and the sinks
//! that receive decoded payloads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Directory (relative to the report root) that holds attachment files.
pub const ATTACHMENT_DIRECTORY: &str = "attachments";

/// MIME types with a known file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Png,
    Gif,
    Bmp,
    Jpeg,
    Svg,
    Txt,
    Html,
    Xml,
    Json,
    Pdf,
    Zip,
    Mp4,
    Unknown,
}

impl MimeType {
    /// Resolve a MIME string; parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(raw: &str) -> Self {
        let essence = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Self::Png,
            "image/gif" => Self::Gif,
            "image/bmp" => Self::Bmp,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/svg+xml" => Self::Svg,
            "text/plain" => Self::Txt,
            "text/html" => Self::Html,
            "text/xml" | "application/xml" => Self::Xml,
            "application/json" => Self::Json,
            "application/pdf" => Self::Pdf,
            "application/zip" => Self::Zip,
            "video/mp4" => Self::Mp4,
            _ => Self::Unknown,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Txt => "txt",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Pdf => "pdf",
            Self::Zip => "zip",
            Self::Mp4 => "mp4",
            Self::Unknown => "unknown",
        }
    }

    pub const fn is_image(self) -> bool {
        matches!(
            self,
            Self::Png | Self::Gif | Self::Bmp | Self::Jpeg | Self::Svg
        )
    }
}

/// Per-run attachment counter. The first attachment is number 1.
#[derive(Debug, Clone)]
pub struct AttachmentSequence {
    next: u32,
}

impl Default for AttachmentSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl AttachmentSequence {
    /// Claim the next file name: `attachment{NNN}.{ext}`.
    pub fn next_filename(&mut self, mime: MimeType) -> String {
        let name = format!("attachment{:03}.{}", self.next, mime.extension());
        self.next = self.next.saturating_add(1);
        name
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

/// Decode a base64 payload. Payloads that are not valid base64 are returned
/// verbatim; the flag reports whether decoding succeeded.
pub fn decode_payload(data: &str) -> (Vec<u8>, bool) {
    let compact: String = data.chars().filter(|ch| !ch.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => (bytes, true),
        Err(_) => (data.as_bytes().to_vec(), false),
    }
}

/// Receives externalized attachment payloads.
pub trait AttachmentSink {
    fn store(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()>;
}

/// Writes attachments into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryAttachmentSink {
    dir: PathBuf,
}

impl DirectoryAttachmentSink {
    /// The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AttachmentSink for DirectoryAttachmentSink {
    fn store(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.dir.join(filename), bytes)
    }
}

/// Keeps attachments in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttachmentSink {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl AttachmentSink for MemoryAttachmentSink {
    fn store(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.files.insert(filename.to_owned(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_pads() {
        let mut seq = AttachmentSequence::default();
        assert_eq!(seq.next_filename(MimeType::Png), "attachment001.png");
        assert_eq!(seq.next_filename(MimeType::Txt), "attachment002.txt");
        assert_eq!(seq.next_filename(MimeType::Unknown), "attachment003.unknown");
        assert_eq!(seq.issued(), 3);
    }

    #[test]
    fn sequence_grows_past_three_digits() {
        let mut seq = AttachmentSequence { next: 1000 };
        assert_eq!(seq.next_filename(MimeType::Json), "attachment1000.json");
    }

    #[test]
    fn mime_resolution() {
        assert_eq!(MimeType::from_mime("image/png"), MimeType::Png);
        assert_eq!(MimeType::from_mime("IMAGE/JPEG"), MimeType::Jpeg);
        assert_eq!(
            MimeType::from_mime("text/plain; charset=utf-8"),
            MimeType::Txt
        );
        assert_eq!(MimeType::from_mime("application/x-custom"), MimeType::Unknown);
        assert_eq!(MimeType::from_mime(""), MimeType::Unknown);
        assert!(MimeType::Svg.is_image());
        assert!(!MimeType::Json.is_image());
    }

    #[test]
    fn decode_valid_and_invalid_base64() {
        let (bytes, decoded) = decode_payload("aGVs\nbG8=");
        assert!(decoded);
        assert_eq!(bytes, b"hello");

        let (bytes, decoded) = decode_payload("123");
        assert!(!decoded);
        assert_eq!(bytes, b"123");
    }

    #[test]
    fn directory_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectoryAttachmentSink::new(dir.path());
        sink.store("attachment001.txt", b"payload").unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("attachment001.txt")).unwrap(),
            b"payload"
        );
    }
}
