use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// A resume file as selected by the user. Transient: lives only between
/// selection and submission (or replacement by the next selection).
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub mime: String,
    pub data: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// What the intake service extracted from one uploaded resume.
/// Immutable once produced; replaced wholesale by the next successful
/// upload and cleared whenever a new file is staged.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedProfile {
    pub filename: String,
    /// Full extracted text, used as the analysis input.
    pub text: String,
    /// Anonymized preview text for display.
    pub preview: String,
    pub skills: Vec<String>,
    pub skill_count: usize,
}

/// Which backend produced the analysis payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The deterministic local baseline analyzer.
    Fallback,
    Enhanced,
}

impl AnalysisSource {
    /// Human label matching what the presentation layer shows.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisSource::Fallback => "Local baseline",
            AnalysisSource::Enhanced => "Enhanced analyzer",
        }
    }
}

/// A completed career analysis for one extracted profile.
///
/// The `analysis` payload's schema belongs to the analysis service, not
/// to this client; it is carried as an open `Value` and passed through
/// to the presentation layer unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub role: String,
    pub industry: String,
    pub analysis: Value,
    pub source: AnalysisSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_file_size_tracks_payload() {
        let file = ResumeFile::new("cv.pdf", "application/pdf", vec![0u8; 42]);
        assert_eq!(file.size(), 42);
        assert!(!file.is_image());
    }

    #[test]
    fn test_image_detection_by_mime_prefix() {
        let jpg = ResumeFile::new("scan.jpg", "image/jpeg", vec![0u8; 4]);
        let png = ResumeFile::new("scan.png", "image/png", vec![0u8; 4]);
        assert!(jpg.is_image());
        assert!(png.is_image());
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(AnalysisSource::Fallback.label(), "Local baseline");
        assert_eq!(AnalysisSource::Enhanced.label(), "Enhanced analyzer");
    }
}
