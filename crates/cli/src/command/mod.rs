// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    io::Error as IoError,
    path::{Path, PathBuf},
};

use thiserror::Error;

use retag_core::MetadataRequest;
use retag_core_json::outcome::{ErrorType, UpdateResult};
use retag_media_file::io::update::{
    Outcome, UPDATE_SUCCEEDED_MESSAGE, UpdateConfig, UpdateError, select_adapter,
    update_file_metadata,
};

mod json {
    pub(super) use retag_core_json::metadata::MetadataRequest;
}

/// Where the metadata document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MetadataSource {
    File(PathBuf),
    Inline(String),
}

impl MetadataSource {
    /// A metadata file takes precedence over inline JSON.
    #[must_use]
    pub(crate) fn select(metadata_file: Option<&str>, inline_json: Option<&str>) -> Option<Self> {
        metadata_file
            .map(|path| Self::File(path.into()))
            .or_else(|| inline_json.map(|json| Self::Inline(json.to_owned())))
    }
}

#[derive(Error, Debug)]
pub(crate) enum RequestError {
    #[error("no metadata provided")]
    Missing,

    #[error("failed to read metadata file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: IoError,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RequestError {
    #[must_use]
    pub(crate) const fn error_type(&self) -> ErrorType {
        match self {
            Self::Missing | Self::Read { .. } => ErrorType::ProcessingError,
            Self::Json(_) => ErrorType::JsonError,
        }
    }
}

fn read_metadata_file(path: &Path) -> Result<String, RequestError> {
    fs::read_to_string(path).map_err(|source| RequestError::Read {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn load_metadata_request(
    source: Option<&MetadataSource>,
) -> Result<MetadataRequest, RequestError> {
    let json = match source {
        None => return Err(RequestError::Missing),
        Some(MetadataSource::File(path)) => read_metadata_file(path)?,
        Some(MetadataSource::Inline(json)) => json.clone(),
    };
    let request = serde_json::from_str::<json::MetadataRequest>(&json)?;
    Ok(request.into())
}

fn rejected(file_path: &str, err: UpdateError) -> UpdateResult {
    let error_kind = err.kind();
    let error = err.to_string();
    let traceback = format!("{:?}", anyhow::Error::from(err));
    UpdateResult::rejected(error_kind, error, file_path).with_traceback(traceback)
}

/// Update the metadata of a file and report the result.
///
/// The metadata is loaded and validated before the file is touched.
#[must_use]
pub(crate) fn update_file(
    file_path: &str,
    source: Option<&MetadataSource>,
    config: &UpdateConfig,
) -> UpdateResult {
    let request = match load_metadata_request(source) {
        Ok(request) => request,
        Err(err) => {
            log::error!("Failed to load metadata: {err}");
            return UpdateResult::failed(err.error_type(), err.to_string());
        }
    };
    match update_file_metadata(Path::new(file_path), config, &request) {
        Ok(Outcome { format, issues }) => {
            if !issues.is_empty() {
                log::info!(
                    "Updated {format} file {file_path} with {num_issues} issue(s)",
                    num_issues = issues.messages().len()
                );
            }
            UpdateResult::succeeded(UPDATE_SUCCEEDED_MESSAGE, file_path)
        }
        Err(err) => rejected(file_path, err),
    }
}

/// Report the detected format of a file without modifying it.
#[must_use]
pub(crate) fn probe_file(file_path: &str) -> UpdateResult {
    match retag_media_file::io::update::probe_file(Path::new(file_path)) {
        Ok(format) => {
            let supported = select_adapter(&format).is_ok();
            UpdateResult::probed(file_path, format.name(), supported)
        }
        Err(err) => rejected(file_path, err),
    }
}
