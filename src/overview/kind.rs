//! File categories used by `includeTypes`

use crate::vault::File;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogv", "mov", "mkv"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "3gp", "flac", "ogg", "oga", "opus"];

/// Content category of a file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Markdown,
    Canvas,
    Pdf,
    Image,
    Video,
    Audio,
    Other,
}

impl FileKind {
    /// Categorize an extension (without the dot). Unknown extensions are
    /// `Other`.
    ///
    /// ```
    /// use folder_notes::overview::FileKind;
    ///
    /// assert_eq!(FileKind::from_extension("md"), FileKind::Markdown);
    /// assert_eq!(FileKind::from_extension("PNG"), FileKind::Image);
    /// assert_eq!(FileKind::from_extension("zip"), FileKind::Other);
    /// ```
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "md" => FileKind::Markdown,
            "canvas" => FileKind::Canvas,
            "pdf" => FileKind::Pdf,
            e if IMAGE_EXTENSIONS.contains(&e) => FileKind::Image,
            e if VIDEO_EXTENSIONS.contains(&e) => FileKind::Video,
            e if AUDIO_EXTENSIONS.contains(&e) => FileKind::Audio,
            _ => FileKind::Other,
        }
    }

    /// Tag used for this category in `includeTypes`.
    pub fn tag(&self) -> &'static str {
        match self {
            FileKind::Markdown => "markdown",
            FileKind::Canvas => "canvas",
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Other => "other",
        }
    }
}

/// Whether `file` passes the `includeTypes` selection.
///
/// Audio is the odd one out: an audio file passes only when `audio` is *not*
/// selected.
pub fn accepts(file: &File, include_types: &[String]) -> bool {
    let selected = |tag: &str| include_types.iter().any(|t| t == tag);
    if include_types.is_empty() || selected("all") {
        return true;
    }
    match FileKind::from_extension(&file.extension) {
        FileKind::Audio => !selected("audio"),
        kind => selected(kind.tag()),
    }
}
