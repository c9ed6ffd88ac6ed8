// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use strum::{EnumIter, IntoEnumIterator as _};

use crate::{cover::CoverSource, util::string::non_empty_from};

/// The textual fields that could be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Genre,
}

/// The release year, either as free text or as a number.
///
/// Always written as text into the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Year {
    Text(String),
    Number(i64),
}

impl Year {
    /// The text that should be written into the file, if any.
    ///
    /// Empty text and the number 0 are considered as missing.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => non_empty_from(text.as_str()),
            Self::Number(0) => None,
            Self::Number(number) => Some(number.to_string()),
        }
    }
}

/// A partial update of the metadata of a single file.
///
/// Missing fields are not touched, i.e. the corresponding tags
/// in the file are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRequest {
    pub title: Option<String>,

    pub artist: Option<String>,

    pub album: Option<String>,

    pub year: Option<Year>,

    pub genre: Option<String>,

    pub cover: Option<CoverSource>,
}

impl MetadataRequest {
    /// The text of a field that should be written into the file.
    ///
    /// Returns `None` if the field is missing or empty. Any other
    /// text is written verbatim, including surrounding whitespace.
    #[must_use]
    pub fn field_text(&self, field: Field) -> Option<String> {
        let text = match field {
            Field::Title => self.title.as_deref(),
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Year => return self.year.as_ref().and_then(Year::to_text),
            Field::Genre => self.genre.as_deref(),
        };
        text.and_then(non_empty_from)
    }

    /// All fields that should be written, in a stable order.
    pub fn text_fields(&self) -> impl Iterator<Item = (Field, String)> + '_ {
        Field::iter().filter_map(|field| self.field_text(field).map(|text| (field, text)))
    }
}
