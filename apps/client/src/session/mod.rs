//! Session orchestrator — owns the session state machine and all shared
//! mutable state (staged file, extracted profile, analysis result, role
//! catalog). No other component mutates any of it.
//!
//! There is no network-level cancellation. Every asynchronous response
//! is attributed to the selection generation it was issued under, and a
//! response whose generation no longer matches the current selection is
//! discarded. That guard, not cancellation, is what makes rapid
//! re-selection races safe.

mod staging;

pub use staging::{PreviewHandle, StagedSelection};

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::debug;

use crate::errors::{ClientError, ValidationError};
use crate::models::{AnalysisResult, ExtractedProfile, ResumeFile};
use crate::notify::{Notice, NotificationSink};
use crate::services::analysis::{AnalysisService, AnalyzeRequest};
use crate::services::catalog::{reconcile_selection, CatalogService};
use crate::services::intake::IntakeService;
use crate::validate;

/// Role shown before the catalog has loaded.
pub const DEFAULT_ROLE: &str = "Data Analyst";
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Intermediate";
pub const DEFAULT_INDUSTRY: &str = "Technology";

/// Where the session currently stands. Re-enterable indefinitely; there
/// is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Staged,
    Uploading,
    /// Upload succeeded; analysis dispatch is imminent.
    ExtractedOnly,
    Analyzing,
    AnalysisReady,
    /// Analysis degraded; the extracted profile stays visible.
    AnalysisFailed,
}

/// What a `submit` call amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Upload and analysis both succeeded.
    Analyzed,
    /// Upload succeeded, analysis degraded non-fatally.
    ExtractedOnly,
    /// A newer selection superseded this submission; its responses were
    /// discarded.
    Superseded,
}

struct SessionCore {
    phase: Phase,
    /// Bumped on every new selection; stamps each in-flight operation.
    generation: u64,
    staged: Option<StagedSelection>,
    profile: Option<ExtractedProfile>,
    analysis: Option<AnalysisResult>,
    roles: Vec<String>,
    selected_role: String,
    experience_level: String,
    industry: String,
    /// Generation of the outstanding submission, if any.
    in_flight: Option<u64>,
    /// Newest issued catalog-load token; stale loads lose the compare.
    catalog_epoch: u64,
    roles_loading: bool,
}

impl Default for SessionCore {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            staged: None,
            profile: None,
            analysis: None,
            roles: Vec::new(),
            selected_role: DEFAULT_ROLE.to_string(),
            experience_level: DEFAULT_EXPERIENCE_LEVEL.to_string(),
            industry: DEFAULT_INDUSTRY.to_string(),
            in_flight: None,
            catalog_epoch: 0,
            roles_loading: false,
        }
    }
}

/// Immutable view of the session handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub generation: u64,
    pub staged: Option<StagedFileInfo>,
    pub profile: Option<ExtractedProfile>,
    pub analysis: Option<AnalysisResult>,
    pub roles: Vec<String>,
    pub selected_role: String,
    pub roles_loading: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StagedFileInfo {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub preview_path: Option<PathBuf>,
}

pub struct SessionOrchestrator {
    intake: Arc<dyn IntakeService>,
    analysis: Arc<dyn AnalysisService>,
    catalog: Arc<dyn CatalogService>,
    sink: Arc<dyn NotificationSink>,
    core: Mutex<SessionCore>,
}

impl SessionOrchestrator {
    pub fn new(
        intake: Arc<dyn IntakeService>,
        analysis: Arc<dyn AnalysisService>,
        catalog: Arc<dyn CatalogService>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            intake,
            analysis,
            catalog,
            sink,
            core: Mutex::new(SessionCore::default()),
        }
    }

    // The lock is never held across an await.
    fn core(&self) -> MutexGuard<'_, SessionCore> {
        self.core.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stages a new selection. Validation runs first; a rejected file
    /// changes nothing. An accepted file supersedes the previous
    /// selection from any phase: the old preview is released, extracted
    /// and analysis data are cleared, and the generation bump
    /// invalidates every response still in flight.
    pub fn select_file(&self, file: ResumeFile) -> Result<(), ClientError> {
        if let Err(reason) = validate::validate(&file) {
            let notice = match &reason {
                ValidationError::UnsupportedType { .. } => {
                    Notice::error("Unsupported file", "Please upload a PDF, JPG, or PNG.")
                }
                ValidationError::TooLarge { .. } => {
                    Notice::error("File too large", "Max file size is 5MB.")
                }
            };
            self.sink.notify(notice);
            return Err(reason.into());
        }

        let staged = StagedSelection::new(file)?;
        let mut core = self.core();
        core.generation += 1;
        core.staged = Some(staged);
        core.profile = None;
        core.analysis = None;
        core.phase = Phase::Staged;
        debug!(generation = core.generation, "file staged");
        Ok(())
    }

    /// Changes the target role. Must be a catalog member once the
    /// catalog is non-empty; before any load, any role is accepted.
    pub fn select_role(&self, role: impl Into<String>) -> Result<(), ClientError> {
        let role = role.into();
        let mut core = self.core();
        if !core.roles.is_empty() && !core.roles.iter().any(|r| r == &role) {
            return Err(ClientError::UnknownRole(role));
        }
        core.selected_role = role;
        Ok(())
    }

    pub fn set_experience_level(&self, level: impl Into<String>) {
        self.core().experience_level = level.into();
    }

    pub fn set_industry(&self, industry: impl Into<String>) {
        self.core().industry = industry.into();
    }

    /// True while an upload or analysis for the *current* selection is
    /// outstanding; the submit control should be disabled. A superseded
    /// flight no longer counts.
    pub fn is_busy(&self) -> bool {
        let core = self.core();
        core.in_flight == Some(core.generation)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let core = self.core();
        SessionSnapshot {
            phase: core.phase,
            generation: core.generation,
            staged: core.staged.as_ref().map(|s| StagedFileInfo {
                name: s.file.name.clone(),
                mime: s.file.mime.clone(),
                size: s.file.size(),
                preview_path: s.preview_path().map(|p| p.to_path_buf()),
            }),
            profile: core.profile.clone(),
            analysis: core.analysis.clone(),
            roles: core.roles.clone(),
            selected_role: core.selected_role.clone(),
            roles_loading: core.roles_loading,
            busy: core.in_flight == Some(core.generation),
        }
    }

    /// Loads the role catalog. Each call takes a fresh epoch token; a
    /// response arriving after a newer call has been issued is dropped,
    /// so the last call always wins regardless of arrival order.
    pub async fn load_roles(&self) -> Result<(), ClientError> {
        let token = {
            let mut core = self.core();
            core.catalog_epoch += 1;
            core.roles_loading = true;
            core.catalog_epoch
        };

        let loaded = self.catalog.load().await;

        let mut core = self.core();
        if token != core.catalog_epoch {
            debug!(token, current = core.catalog_epoch, "discarding stale role catalog");
            return Ok(());
        }
        core.roles_loading = false;
        match loaded {
            Ok(roles) => {
                core.selected_role = reconcile_selection(&core.selected_role, &roles);
                core.roles = roles;
                debug!(roles = core.roles.len(), selected = %core.selected_role, "role catalog loaded");
                Ok(())
            }
            Err(err) => {
                core.roles.clear();
                self.sink
                    .notify(Notice::error("Could not fetch roles", err.to_string()));
                Err(err)
            }
        }
    }

    /// Submits the staged file: the upload, then the chained analysis
    /// for the same generation. Upload failure is fatal to the
    /// submission (back to `Idle`, staging cleared); analysis failure
    /// is not (the extracted profile stays). A selection made while
    /// either call is outstanding supersedes the whole submission.
    pub async fn submit(&self) -> Result<SubmitOutcome, ClientError> {
        let (file, generation) = {
            let mut core = self.core();
            if core.in_flight == Some(core.generation) {
                return Err(ClientError::SubmissionInFlight);
            }
            let staged = match core.staged.as_ref() {
                Some(staged) => staged,
                None => {
                    self.sink.notify(Notice::info(
                        "No file selected",
                        "Please choose a resume first.",
                    ));
                    return Err(ClientError::NothingStaged);
                }
            };
            let file = staged.file.clone();
            core.profile = None;
            core.analysis = None;
            core.phase = Phase::Uploading;
            core.in_flight = Some(core.generation);
            (file, core.generation)
        };

        let uploaded = self.intake.submit(&file).await;

        let request = {
            let mut core = self.core();
            if core.generation != generation {
                debug!(generation, current = core.generation, "discarding stale upload response");
                return Ok(SubmitOutcome::Superseded);
            }
            match uploaded {
                Ok(profile) => {
                    self.sink.notify(Notice::info(
                        "Resume processed",
                        format!("Found {} skill(s).", profile.skill_count),
                    ));
                    let request = AnalyzeRequest {
                        resume_text: profile.text.clone(),
                        skills: profile.skills.clone(),
                        target_role: core.selected_role.clone(),
                        experience_level: Some(core.experience_level.clone()),
                        industry: Some(core.industry.clone()),
                    };
                    core.profile = Some(profile);
                    core.phase = Phase::ExtractedOnly;
                    request
                }
                Err(err) => {
                    core.phase = Phase::Idle;
                    core.staged = None;
                    core.in_flight = None;
                    self.sink
                        .notify(Notice::error("Upload failed", err.to_string()));
                    return Err(err);
                }
            }
        };

        // Extraction automatically triggers analysis.
        {
            let mut core = self.core();
            if core.generation != generation {
                return Ok(SubmitOutcome::Superseded);
            }
            core.phase = Phase::Analyzing;
        }

        let analyzed = self.analysis.analyze(&request).await;

        let mut core = self.core();
        if core.generation != generation {
            debug!(generation, current = core.generation, "discarding stale analysis response");
            return Ok(SubmitOutcome::Superseded);
        }
        core.in_flight = None;
        match analyzed {
            Ok(result) => {
                self.sink.notify(Notice::info(
                    "Analysis ready",
                    format!("Source: {}", result.source.label()),
                ));
                core.analysis = Some(result);
                core.phase = Phase::AnalysisReady;
                Ok(SubmitOutcome::Analyzed)
            }
            Err(err) => {
                // Non-fatal: skills and text from the upload stay visible.
                core.phase = Phase::AnalysisFailed;
                let detail = match &err {
                    ClientError::AnalysisUnavailable { body } if !body.is_empty() => body.clone(),
                    _ => "Showing extracted skills only.".to_string(),
                };
                self.sink
                    .notify(Notice::info("Analyzer not available", detail));
                Ok(SubmitOutcome::ExtractedOnly)
            }
        }
    }
}
