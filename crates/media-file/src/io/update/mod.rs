// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs::OpenOptions, io::Seek as _, path::Path};

use lofty::{file::AudioFile, flac::FlacFile, mp4::Mp4File, ogg::VorbisFile};

use retag_core::{CoverImage, CoverSource, ErrorKind, MetadataRequest};

use crate::{
    Error, Result,
    fmt::{AudioFormat, detect_audio_format, parse_options, write_options},
    util::cover::{CoverMediaType, load_cover_image},
};

pub const UPDATE_SUCCEEDED_MESSAGE: &str = "metadata update succeeded";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateConfig {
    pub cover_media_type: CoverMediaType,
}

/// Recoverable errors and warnings
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Issues {
    messages: Vec<String>,
}

impl Issues {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self { messages } = self;
        messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        let Self { messages } = self;
        messages
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug_assert!(!message.trim().is_empty());
        self.messages.push(message);
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        let Self { messages } = self;
        messages
    }
}

/// Collects issues while exporting metadata into a single file.
#[derive(Debug)]
pub(crate) struct Updater<'c> {
    config: &'c UpdateConfig,
    issues: Issues,
}

impl<'c> Updater<'c> {
    #[must_use]
    pub(crate) const fn new(config: &'c UpdateConfig) -> Self {
        Self {
            config,
            issues: Issues::new(),
        }
    }

    pub(crate) fn add_issue(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.issues.add_message(message);
    }

    /// Failures are only recorded as issues.
    #[must_use]
    pub(crate) fn load_cover_image(&mut self, source: &CoverSource) -> Option<CoverImage> {
        match load_cover_image(source, self.config.cover_media_type) {
            Ok(cover_image) => {
                log::debug!("Loaded cover image: {cover_image:?}");
                Some(cover_image)
            }
            Err(err) => {
                self.add_issue(format!("Skipping cover image: {err}"));
                None
            }
        }
    }

    #[must_use]
    pub(crate) fn finish(self) -> Issues {
        let Self { config: _, issues } = self;
        issues
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("file not found")]
    FileNotFound,

    #[error("unrecognized audio format")]
    UnrecognizedFormat,

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("metadata update failed")]
    AdapterFailure(#[source] Error),
}

impl UpdateError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound => ErrorKind::FileNotFound,
            Self::UnrecognizedFormat => ErrorKind::UnrecognizedFormat,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::AdapterFailure(_) => ErrorKind::AdapterFailure,
        }
    }
}

/// The editor that is responsible for a detected format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    Flac,
    Mp4,

    /// Ogg containers, parsed as Ogg Vorbis.
    Ogg,
}

pub fn select_adapter(format: &AudioFormat) -> std::result::Result<Adapter, UpdateError> {
    match format {
        AudioFormat::Flac => Ok(Adapter::Flac),
        AudioFormat::Mp4 => Ok(Adapter::Mp4),
        AudioFormat::OggVorbis | AudioFormat::OggFlac => Ok(Adapter::Ogg),
        AudioFormat::Unsupported(name) => Err(UpdateError::UnsupportedFormat(name.clone())),
        AudioFormat::Unreadable => Err(UpdateError::UnrecognizedFormat),
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub format: AudioFormat,
    pub issues: Issues,
}

/// Detect the format of an existing file without modifying it.
pub fn probe_file(path: &Path) -> std::result::Result<AudioFormat, UpdateError> {
    if !path.is_file() {
        return Err(UpdateError::FileNotFound);
    }
    Ok(detect_audio_format(path))
}

/// Write the requested metadata into an audio file.
///
/// The file is modified in place. Fields that are missing in the
/// request are preserved. Failures of loading or embedding the cover
/// image are not fatal and only reported as issues of the outcome.
pub fn update_file_metadata(
    path: &Path,
    config: &UpdateConfig,
    request: &MetadataRequest,
) -> std::result::Result<Outcome, UpdateError> {
    let format = probe_file(path)?;
    let adapter = match select_adapter(&format) {
        Ok(adapter) => adapter,
        Err(err) => {
            log::info!(
                "Skipping update of file {path}: {err}",
                path = path.display()
            );
            return Err(err);
        }
    };
    log::debug!(
        "Updating metadata of {format} file {path}: {request:?}",
        path = path.display()
    );
    let mut updater = Updater::new(config);
    if let Err(err) = update_file_with_adapter(&mut updater, adapter, path, request) {
        log::warn!(
            "Failed to update metadata of {format} file {path}: {err}",
            path = path.display()
        );
        return Err(UpdateError::AdapterFailure(err));
    }
    let issues = updater.finish();
    log::info!(
        "Updated metadata of {format} file {path}",
        path = path.display()
    );
    Ok(Outcome { format, issues })
}

fn update_file_with_adapter(
    updater: &mut Updater<'_>,
    adapter: Adapter,
    path: &Path,
    request: &MetadataRequest,
) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let parse_options = parse_options();
    let write_options = write_options();
    match adapter {
        Adapter::Flac => {
            let mut flac_file = <FlacFile as AudioFile>::read_from(&mut file, parse_options)?;
            crate::fmt::flac::export_metadata_to_file(updater, &mut flac_file, request);
            crate::fmt::flac::save_to_file(&flac_file, &mut file, write_options)?;
        }
        Adapter::Mp4 => {
            let mut mp4_file = <Mp4File as AudioFile>::read_from(&mut file, parse_options)?;
            crate::fmt::mp4::export_metadata_to_file(updater, &mut mp4_file, request);
            file.rewind()?;
            mp4_file.save_to(&mut file, write_options)?;
        }
        Adapter::Ogg => {
            let mut ogg_file = <VorbisFile as AudioFile>::read_from(&mut file, parse_options)?;
            crate::fmt::ogg::export_metadata_to_file(updater, &mut ogg_file, request);
            file.rewind()?;
            ogg_file.save_to(&mut file, write_options)?;
        }
    }
    Ok(())
}
