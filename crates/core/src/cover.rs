// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, path::PathBuf};

use mime::Mime;

/// Where the image data for a new cover is taken from.
#[derive(Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// An image file that is read in full.
    File(PathBuf),

    /// Base64 encoded image data.
    Data(String),
}

impl fmt::Debug for CoverSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            // Inline image data might be huge
            Self::Data(encoded) => f
                .debug_struct("Data")
                .field("encoded_len", &encoded.len())
                .finish(),
        }
    }
}

/// Raw image data that is about to be embedded as a cover.
///
/// The contents of `image_data` are not validated.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub media_type: Mime,

    pub image_data: Vec<u8>,
}

impl CoverImage {
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.image_data.len()
    }
}

impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("media_type", &self.media_type)
            .field("data_size", &self.data_size())
            .finish()
    }
}
