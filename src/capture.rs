//! Image capture collaborators
//!
//! The sampling loop asks a [`Capture`] to produce `<prefix><i>.jpg` before
//! reading its metadata. In dry runs nothing is captured and the numbered
//! fixture files must already exist.

use crate::types::GeoPoint;
use crate::Result;
use anyhow::{bail, Context};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

pub trait Capture {
    /// Produce an image at `target`, optionally tagged near `hint`
    fn capture(&mut self, target: &Path, hint: Option<&GeoPoint>) -> Result<()>;
}

impl<T: Capture + ?Sized> Capture for &mut T {
    fn capture(&mut self, target: &Path, hint: Option<&GeoPoint>) -> Result<()> {
        (**self).capture(target, hint)
    }
}

/// No-op capture that relies on pre-existing files
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunCapture;

impl Capture for DryRunCapture {
    fn capture(&mut self, target: &Path, _hint: Option<&GeoPoint>) -> Result<()> {
        info!("taking picture {} (dry run)", target.display());
        Ok(())
    }
}

/// Runs an external camera program once per capture
///
/// Arguments may contain `{path}`, `{lat}` and `{lon}` placeholders.
/// `{lat}`/`{lon}` expand to an empty string when no hint is available.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandCapture {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandCapture {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Arguments with placeholders substituted
    pub fn expand_args(&self, target: &Path, hint: Option<&GeoPoint>) -> Vec<String> {
        let path = target.display().to_string();
        let (lat, lon) = hint
            .map(|p| (format!("{:.7}", p.latitude_deg), format!("{:.7}", p.longitude_deg)))
            .unwrap_or_default();

        self.args
            .iter()
            .map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{lat}", &lat)
                    .replace("{lon}", &lon)
            })
            .collect()
    }
}

impl Capture for CommandCapture {
    fn capture(&mut self, target: &Path, hint: Option<&GeoPoint>) -> Result<()> {
        info!("taking picture {}", target.display());

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create image directory: {}", parent.display())
                })?;
            }
        }

        let args = self.expand_args(target, hint);
        debug!(program = %self.program, ?args, "running capture command");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .with_context(|| format!("Failed to run capture command '{}'", self.program))?;

        if !status.success() {
            bail!(
                "Capture command '{}' failed with {} for {}",
                self.program,
                status,
                target.display()
            );
        }
        Ok(())
    }
}
