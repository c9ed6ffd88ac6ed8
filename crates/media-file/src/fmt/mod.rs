// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read as _, Seek as _},
    path::Path,
};

use lofty::{
    config::{ParseOptions, WriteOptions},
    file::FileType,
    picture::{MimeType, Picture, PictureType},
    probe::Probe,
};
use mime::Mime;

use retag_core::CoverImage;

use crate::Result;

pub(crate) mod flac;

pub(crate) mod mp4;

pub(crate) mod ogg;

pub(crate) mod vorbis;

/// Page header (27 bytes) + segment table (up to 255 bytes) + codec signature.
const OGG_HEADER_MAX_LEN: u64 = 27 + 255 + 8;

const OGG_FLAC_SIGNATURE: &[u8] = b"\x7fFLAC";

/// Container formats that are distinguished when detecting the format
/// of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Flac,

    /// MP4/M4A
    Mp4,

    OggVorbis,

    /// FLAC encapsulated in an Ogg container.
    OggFlac,

    /// A known audio format that could not be edited.
    Unsupported(String),

    /// Either unknown contents or the file could not be read.
    Unreadable,
}

impl AudioFormat {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Flac => "FLAC",
            Self::Mp4 => "MP4",
            Self::OggVorbis => "OggVorbis",
            Self::OggFlac => "OggFLAC",
            Self::Unsupported(name) => name,
            Self::Unreadable => "unknown",
        }
    }

    fn from_file_type(file_type: FileType) -> Self {
        let name = match file_type {
            FileType::Flac => return Self::Flac,
            FileType::Mp4 => return Self::Mp4,
            FileType::Vorbis => return Self::OggVorbis,
            FileType::Aac => "AAC",
            FileType::Aiff => "AIFF",
            FileType::Ape => "APE",
            FileType::Mpeg => "MP3",
            FileType::Opus => "OggOpus",
            FileType::Speex => "OggSpeex",
            FileType::Wav => "WAVE",
            FileType::WavPack => "WavPack",
            other => return Self::Unsupported(format!("{other:?}")),
        };
        Self::Unsupported(name.to_owned())
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the container format by inspecting the contents of a file.
///
/// The file extension is ignored. Never fails, all errors are
/// reported as [`AudioFormat::Unreadable`].
#[must_use]
pub fn detect_audio_format(path: &Path) -> AudioFormat {
    match try_detect_audio_format(path) {
        Ok(format) => format,
        Err(err) => {
            log::debug!(
                "Failed to detect audio format of file {path}: {err}",
                path = path.display()
            );
            AudioFormat::Unreadable
        }
    }
}

fn try_detect_audio_format(path: &Path) -> Result<AudioFormat> {
    let mut file = File::open(path)?;
    let mut header = Vec::new();
    (&mut file).take(OGG_HEADER_MAX_LEN).read_to_end(&mut header)?;
    if is_ogg_flac(&header) {
        return Ok(AudioFormat::OggFlac);
    }
    file.rewind()?;
    let probe = Probe::new(BufReader::new(file)).guess_file_type()?;
    let format = probe
        .file_type()
        .map_or(AudioFormat::Unreadable, AudioFormat::from_file_type);
    Ok(format)
}

/// Ogg FLAC is not recognized by lofty and needs to be detected
/// separately from the first packet of the stream.
fn is_ogg_flac(header: &[u8]) -> bool {
    if !header.starts_with(b"OggS") || header.len() < 27 {
        return false;
    }
    let packet_start = 27 + usize::from(header[26]);
    header
        .get(packet_start..)
        .is_some_and(|packet| packet.starts_with(OGG_FLAC_SIGNATURE))
}

pub(crate) fn parse_options() -> ParseOptions {
    // Audio properties are not needed for editing. Pictures must
    // be read for preserving them when saving the file.
    ParseOptions::new().read_properties(false)
}

pub(crate) fn write_options() -> WriteOptions {
    WriteOptions::default()
}

const COVER_DESCRIPTION: &str = "Album Cover";

fn mime_type_from_media_type(media_type: &Mime) -> MimeType {
    match media_type.essence_str() {
        "image/bmp" => MimeType::Bmp,
        "image/gif" => MimeType::Gif,
        "image/jpeg" => MimeType::Jpeg,
        "image/png" => MimeType::Png,
        "image/tiff" => MimeType::Tiff,
        _ => MimeType::Unknown(media_type.to_string()),
    }
}

pub(crate) fn front_cover_picture(cover_image: &CoverImage, with_description: bool) -> Picture {
    let CoverImage {
        media_type,
        image_data,
    } = cover_image;
    let mime_type = mime_type_from_media_type(media_type);
    let description = with_description.then(|| COVER_DESCRIPTION.to_owned());
    Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime_type),
        description,
        image_data.clone(),
    )
}
