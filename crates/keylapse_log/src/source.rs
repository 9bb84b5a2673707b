//! Report loading and session discovery.
//!
//! Sources named `<base>_report<N>.<ext>` are fragments of one logical
//! document's history and merge before replay. A sibling plain-text file
//! named `<base>` (or `<base>.<ext2>`) is the accepted fallback baseline
//! when no source carries an INITIAL record.

use crate::normalize::Diagnostic;
use crate::record::{RawRecord, ReportFile};
use keylapse_core::split_lines;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A source is unreadable or not valid structured data.
///
/// Never fatal to a merge: the offending source contributes zero records
/// and the remaining sources still contribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Filesystem read failed
    #[error("Failed to read {path}: {reason}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying reason
        reason: String,
    },
    /// File content is not a valid report document
    #[error("Invalid report in {path}: {reason}")]
    Format {
        /// Path that failed
        path: String,
        /// Underlying reason
        reason: String,
    },
}

/// One raw record collection contributing to a document's merged history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSource {
    /// Where the records came from, for diagnostics
    pub origin: String,
    /// Records in arrival order
    pub records: Vec<RawRecord>,
}

impl RecordSource {
    /// Build a source from already-parsed records
    #[must_use]
    pub fn new(origin: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            origin: origin.into(),
            records,
        }
    }

    /// Load one report file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file cannot be read or is not a
    /// valid report document.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let report: ReportFile =
            serde_json::from_str(&text).map_err(|e| SourceError::Format {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), records = report.logs.len(), "loaded report");
        Ok(Self {
            origin: path.display().to_string(),
            records: report.logs,
        })
    }
}

/// The files making up one logical document's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFiles {
    /// Report fragments, ordered by their `<N>` suffix
    pub reports: Vec<PathBuf>,
    /// Plain-text fallback baseline, if a sibling exists
    pub baseline: Option<PathBuf>,
}

impl SessionFiles {
    /// Discover the session around one report path.
    ///
    /// If the file name matches `<base>_report<N>.<ext>`, every sibling
    /// with the same base and extension joins the session; otherwise the
    /// given file is the sole report. The fallback baseline is a sibling
    /// named exactly `<base>`, or failing that the first sibling named
    /// `<base>.<ext2>` that is not itself a report fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the containing directory cannot be
    /// listed.
    pub fn discover(report_path: &Path) -> Result<Self, SourceError> {
        let Some(name) = report_path.file_name().and_then(|n| n.to_str()) else {
            return Ok(Self {
                reports: vec![report_path.to_path_buf()],
                baseline: None,
            });
        };
        let Some((base, _, ext)) = parse_report_name(name) else {
            debug!(path = %report_path.display(), "not a numbered fragment, using as sole report");
            return Ok(Self {
                reports: vec![report_path.to_path_buf()],
                baseline: None,
            });
        };

        let dir = report_path.parent().unwrap_or_else(|| Path::new("."));
        let entries = fs::read_dir(dir).map_err(|e| SourceError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut fragments: Vec<(u64, PathBuf)> = Vec::new();
        let mut exact_baseline: Option<PathBuf> = None;
        let mut dotted_baselines: Vec<PathBuf> = Vec::new();

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(entry_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some((b, n, e)) = parse_report_name(entry_name) {
                if b == base && e == ext {
                    fragments.push((n, path));
                }
                continue;
            }
            if entry_name == base {
                exact_baseline = Some(path);
            } else if entry_name.starts_with(base)
                && entry_name[base.len()..].starts_with('.')
            {
                dotted_baselines.push(path);
            }
        }

        fragments.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        dotted_baselines.sort();

        let baseline = exact_baseline.or_else(|| dotted_baselines.into_iter().next());
        Ok(Self {
            reports: fragments.into_iter().map(|(_, p)| p).collect(),
            baseline,
        })
    }
}

/// A loaded session: parsed sources plus the optional fallback baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Sources that parsed, in fragment order
    pub sources: Vec<RecordSource>,
    /// Fallback baseline lines from the plain-text sibling
    pub fallback: Option<Vec<String>>,
    /// Per-source load failures; never fatal
    pub diagnostics: Vec<Diagnostic>,
}

impl Session {
    /// Discover and load everything around one report path.
    ///
    /// Unreadable or malformed fragments contribute zero records and a
    /// [`Diagnostic::SourceLoad`] each; the rest of the session still
    /// loads.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] only if discovery itself fails (the
    /// containing directory cannot be listed).
    pub fn load(report_path: &Path) -> Result<Self, SourceError> {
        let files = SessionFiles::discover(report_path)?;
        Ok(Self::from_files(&files))
    }

    /// Load an already-discovered set of session files.
    #[must_use]
    pub fn from_files(files: &SessionFiles) -> Self {
        let mut sources = Vec::new();
        let mut diagnostics = Vec::new();

        for path in &files.reports {
            match RecordSource::load(path) {
                Ok(source) => sources.push(source),
                Err(err) => {
                    warn!(%err, "skipping unreadable report fragment");
                    diagnostics.push(Diagnostic::SourceLoad {
                        origin: path.display().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let fallback = files.baseline.as_ref().and_then(|path| {
            match fs::read_to_string(path) {
                Ok(text) => Some(split_lines(&text)),
                Err(err) => {
                    warn!(path = %path.display(), %err, "fallback baseline unreadable");
                    diagnostics.push(Diagnostic::SourceLoad {
                        origin: path.display().to_string(),
                        reason: err.to_string(),
                    });
                    None
                }
            }
        });

        Self {
            sources,
            fallback,
            diagnostics,
        }
    }
}

/// Split `<base>_report<N>.<ext>` into its parts.
fn parse_report_name(name: &str) -> Option<(&str, u64, &str)> {
    let marker = name.rfind("_report")?;
    let base = &name[..marker];
    let rest = &name[marker + "_report".len()..];
    let dot = rest.find('.')?;
    let n: u64 = rest[..dot].parse().ok()?;
    let ext = &rest[dot + 1..];
    if base.is_empty() || ext.is_empty() {
        return None;
    }
    Some((base, n, ext))
}
