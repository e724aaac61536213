//! The staged selection and its preview resource.
//!
//! A preview exists only for image files and is owned exclusively by the
//! `StagedSelection` that created it: replacing the selection drops the
//! handle, which removes the file on disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::models::ResumeFile;

/// RAII guard over the on-disk preview copy of an image resume.
pub struct PreviewHandle {
    file: NamedTempFile,
}

impl PreviewHandle {
    fn create(file: &ResumeFile) -> std::io::Result<Self> {
        let suffix = match file.mime.as_str() {
            "image/png" => ".png",
            _ => ".jpg",
        };
        let mut tmp = tempfile::Builder::new()
            .prefix("resume-preview-")
            .suffix(suffix)
            .tempfile()?;
        tmp.write_all(&file.data)?;
        tmp.flush()?;
        Ok(Self { file: tmp })
    }

    /// Where the presentation layer can read the preview from.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("path", &self.file.path())
            .finish()
    }
}

/// The currently chosen resume. At most one exists per session.
#[derive(Debug)]
pub struct StagedSelection {
    pub file: ResumeFile,
    preview: Option<PreviewHandle>,
}

impl StagedSelection {
    /// Stages a validated file, materializing a preview for image types.
    pub fn new(file: ResumeFile) -> std::io::Result<Self> {
        let preview = if file.is_image() {
            Some(PreviewHandle::create(&file)?)
        } else {
            None
        };
        Ok(Self { file, preview })
    }

    pub fn preview_path(&self) -> Option<&Path> {
        self.preview.as_ref().map(|p| p.path())
    }
}
