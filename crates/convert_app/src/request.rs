use std::fs;
use std::path::Path;

use anyhow::Context;
use convert_core::SubmissionRequest;

use crate::cli::Command;

/// Turns the chosen subcommand into a submission, reading the upload from disk.
pub fn build_request(command: Command) -> anyhow::Result<SubmissionRequest> {
    match command {
        Command::Upload { path, content_type } => {
            let bytes = fs::read(&path).with_context(|| {
                format!("Please select a file to upload. Could not read {}", path.display())
            })?;
            Ok(SubmissionRequest::upload(
                upload_filename(&path)?,
                content_type,
                bytes,
            ))
        }
        Command::Reference { source_url } => Ok(SubmissionRequest::reference(source_url)),
    }
}

fn upload_filename(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} does not name a file", path.display()))
}
