//! PDF conversion via a headless office engine subprocess.
//!
//! Runs `soffice --headless --convert-to pdf` against an input staged in
//! a throwaway directory and reads the produced PDF back. The engine is
//! given its own user-installation profile per invocation: concurrent
//! soffice processes sharing the default profile deadlock on its lock
//! file.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use docview_core::{AppConfig, Error};

use super::PdfEngine;

/// Office-engine PDF converter.
pub struct SofficeEngine {
    binary: PathBuf,
    timeout: Duration,
}

impl SofficeEngine {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { binary: binary.into(), timeout }
    }

    /// Derive the engine from the application config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.soffice_path.clone(), config.convert_timeout())
    }
}

/// Keep only characters that are safe in a staged filename; the detected
/// extension feeds the engine's format sniffing but must not influence
/// paths.
fn sanitize_extension(extension: &str) -> String {
    let cleaned: String = extension
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect();
    if cleaned.is_empty() { "bin".to_string() } else { cleaned.to_lowercase() }
}

#[async_trait::async_trait]
impl PdfEngine for SofficeEngine {
    async fn to_pdf(&self, input: &[u8], extension: &str) -> Result<Vec<u8>, Error> {
        let dir = tempfile::tempdir().map_err(Error::Io)?;
        let ext = sanitize_extension(extension);
        let input_path = dir.path().join(format!("input.{ext}"));
        let output_path = dir.path().join("input.pdf");
        let profile_dir = dir.path().join("profile");

        tokio::fs::write(&input_path, input).await?;

        let mut command = Command::new(&self.binary);
        command
            .arg(format!("-env:UserInstallation=file://{}", profile_dir.display()))
            .arg("--headless")
            .arg("--norestore")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(dir.path())
            .arg(&input_path)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| Error::ConversionTimeout(format!("office engine exceeded {:?}", self.timeout)))?
            .map_err(|e| Error::ConversionFailed(format!("failed to run {}: {e}", self.binary.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ConversionFailed(format!(
                "office engine exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        match tokio::fs::read(&output_path).await {
            Ok(pdf) => {
                tracing::debug!(bytes = pdf.len(), "office engine produced pdf");
                Ok(pdf)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::ConversionFailed("office engine produced no output".into()))
            }
            Err(err) => Err(Error::Io(err)),
        }
    }
}
