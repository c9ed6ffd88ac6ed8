// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

mod _core {
    pub(super) use retag_core::outcome::*;
}

/// Coarse classification of failures, see also [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The metadata document could not be parsed or is invalid.
    JsonError,

    /// Everything else, including all rejections of the target file.
    ProcessingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FileNotFound,
    UnrecognizedFormat,
    UnsupportedFormat,
    AdapterFailure,
}

impl From<_core::ErrorKind> for ErrorKind {
    fn from(from: _core::ErrorKind) -> Self {
        use _core::ErrorKind as Kind;
        match from {
            Kind::FileNotFound => Self::FileNotFound,
            Kind::UnrecognizedFormat => Self::UnrecognizedFormat,
            Kind::UnsupportedFormat => Self::UnsupportedFormat,
            Kind::AdapterFailure => Self::AdapterFailure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Succeeded {
    pub success: bool,

    pub message: String,

    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probed {
    pub success: bool,

    pub file_path: String,

    pub format: String,

    pub supported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failed {
    pub success: bool,

    pub error: String,

    pub error_type: ErrorType,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_kind: Option<ErrorKind>,

    /// Same as `error`, only present if the target file has been rejected.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub traceback: Option<String>,
}

/// The single JSON object that is printed when finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateResult {
    Succeeded(Succeeded),
    Probed(Probed),
    Failed(Failed),
}

impl UpdateResult {
    #[must_use]
    pub fn succeeded(message: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::Succeeded(Succeeded {
            success: true,
            message: message.into(),
            file_path: file_path.into(),
        })
    }

    #[must_use]
    pub fn probed(file_path: impl Into<String>, format: impl Into<String>, supported: bool) -> Self {
        Self::Probed(Probed {
            success: true,
            file_path: file_path.into(),
            format: format.into(),
            supported,
        })
    }

    #[must_use]
    pub fn failed(error_type: ErrorType, error: impl Into<String>) -> Self {
        Self::Failed(Failed {
            success: false,
            error: error.into(),
            error_type,
            error_kind: None,
            message: None,
            file_path: None,
            traceback: None,
        })
    }

    /// The target file has been rejected or could not be updated.
    #[must_use]
    pub fn rejected(
        error_kind: impl Into<ErrorKind>,
        error: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self::Failed(Failed {
            success: false,
            message: Some(error.clone()),
            error,
            error_type: ErrorType::ProcessingError,
            error_kind: Some(error_kind.into()),
            file_path: Some(file_path.into()),
            traceback: None,
        })
    }

    #[must_use]
    pub fn with_traceback(self, traceback: impl Into<String>) -> Self {
        match self {
            Self::Failed(failed) => Self::Failed(Failed {
                traceback: Some(traceback.into()),
                ..failed
            }),
            succeeded_or_probed => succeeded_or_probed,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        match self {
            Self::Succeeded(Succeeded { success, .. })
            | Self::Probed(Probed { success, .. })
            | Self::Failed(Failed { success, .. }) => *success,
        }
    }
}
