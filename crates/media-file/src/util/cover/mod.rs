// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, io::Error as IoError, path::Path};

use data_encoding::{BASE64, DecodeError};
use image::{ImageFormat, guess_format};
use mime::{IMAGE_BMP, IMAGE_GIF, IMAGE_JPEG, IMAGE_PNG, Mime};
use thiserror::Error;

use retag_core::{CoverImage, CoverSource};

/// How the media type of a cover image is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverMediaType {
    /// Always declare the image as JPEG, regardless of its contents.
    #[default]
    Jpeg,

    /// Guess the image format from its contents and fall back
    /// to JPEG if the format is unknown.
    Sniff,
}

#[derive(Error, Debug)]
pub enum CoverImageError {
    #[error("failed to read cover image file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: IoError,
    },

    #[error("malformed base64 cover image data: {0}")]
    Decode(#[from] DecodeError),

    #[error("empty cover image data")]
    Empty,
}

#[must_use]
pub fn media_type_from_image_format(image_format: ImageFormat) -> Option<Mime> {
    let media_type = match image_format {
        ImageFormat::Jpeg => IMAGE_JPEG,
        ImageFormat::Png => IMAGE_PNG,
        ImageFormat::Gif => IMAGE_GIF,
        ImageFormat::Bmp => IMAGE_BMP,
        ImageFormat::WebP => return "image/webp".parse().ok(),
        ImageFormat::Tiff => return "image/tiff".parse().ok(),
        _ => return None,
    };
    Some(media_type)
}

fn media_type_of_image_data(image_data: &[u8], cover_media_type: CoverMediaType) -> Mime {
    match cover_media_type {
        CoverMediaType::Jpeg => IMAGE_JPEG,
        CoverMediaType::Sniff => guess_format(image_data)
            .ok()
            .and_then(media_type_from_image_format)
            .unwrap_or(IMAGE_JPEG),
    }
}

fn read_image_file(path: &Path) -> Result<Vec<u8>, CoverImageError> {
    fs::read(path).map_err(|source| CoverImageError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn decode_image_data(encoded: &str) -> Result<Vec<u8>, CoverImageError> {
    let encoded = encoded
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect::<Vec<_>>();
    BASE64.decode(&encoded).map_err(Into::into)
}

/// Load the image data of a cover.
///
/// The contents are not validated, i.e. any non-empty sequence
/// of bytes is accepted.
pub fn load_cover_image(
    source: &CoverSource,
    cover_media_type: CoverMediaType,
) -> Result<CoverImage, CoverImageError> {
    let image_data = match source {
        CoverSource::File(path) => read_image_file(path)?,
        CoverSource::Data(encoded) => decode_image_data(encoded)?,
    };
    if image_data.is_empty() {
        return Err(CoverImageError::Empty);
    }
    let media_type = media_type_of_image_data(&image_data, cover_media_type);
    Ok(CoverImage {
        media_type,
        image_data,
    })
}
