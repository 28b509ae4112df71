//! File classification for icons.

/// Broad file category derived from the extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Text,
    Pdf,
    Image,
    Video,
    Audio,
    Archive,
    Code,
    Unknown,
}

impl FileType {
    /// Detect file type from a file name or path.
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "doc" | "docx" | "rtf" | "odt" => Self::Text,
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "bmp" => Self::Image,
            "mp4" | "mkv" | "avi" | "mov" | "webm" => Self::Video,
            "mp3" | "wav" | "flac" | "ogg" | "m4a" => Self::Audio,
            "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" => Self::Archive,
            "rs" | "js" | "ts" | "py" | "go" | "c" | "cpp" | "h" | "java" | "json" | "toml"
            | "yaml" | "yml" | "html" | "css" | "sh" => Self::Code,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_name("notes.md"), FileType::Text);
        assert_eq!(FileType::from_name("paper.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_name("photo.JPG"), FileType::Image);
        assert_eq!(FileType::from_name("backup.tar.gz"), FileType::Archive);
        assert_eq!(FileType::from_name("main.rs"), FileType::Code);
        assert_eq!(FileType::from_name("Makefile"), FileType::Unknown);
        assert_eq!(FileType::from_name("file.xyz"), FileType::Unknown);
    }
}
