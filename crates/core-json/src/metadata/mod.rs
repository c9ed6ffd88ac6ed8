// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::FpCategory;

use crate::prelude::*;

mod _core {
    pub(super) use retag_core::{cover::CoverSource, metadata::*};
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(untagged)]
pub enum Year {
    Number(i64),

    /// Numbers with a fractional part or exponent, e.g. `2004.0`.
    Float(f64),

    Text(String),
}

/// Formats non-integral numbers like `2004.0` with at least one
/// fractional digit.
fn float_year_text(number: f64) -> String {
    format!("{number:?}")
}

impl From<Year> for _core::Year {
    fn from(from: Year) -> Self {
        match from {
            Year::Number(number) => Self::Number(number),
            // Zero is missing like the integer 0
            Year::Float(number) if number.classify() == FpCategory::Zero => Self::Number(0),
            Year::Float(number) => Self::Text(float_year_text(number)),
            Year::Text(text) => Self::Text(text),
        }
    }
}

/// The metadata document, either loaded from a file or passed inline.
///
/// Unknown keys are ignored and `null` values are treated like
/// missing keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct MetadataRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub album: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub year: Option<Year>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub genre: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cover_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cover_data: Option<String>,
}

impl From<MetadataRequest> for _core::MetadataRequest {
    fn from(from: MetadataRequest) -> Self {
        let MetadataRequest {
            title,
            artist,
            album,
            year,
            genre,
            cover_file,
            cover_data,
        } = from;
        // An empty cover field is ignored and a cover file takes
        // precedence over inline data
        let cover = cover_file
            .filter(|path| !path.is_empty())
            .map(|path| _core::CoverSource::File(path.into()))
            .or_else(|| {
                cover_data
                    .filter(|data| !data.is_empty())
                    .map(_core::CoverSource::Data)
            });
        Self {
            title,
            artist,
            album,
            year: year.map(Into::into),
            genre,
            cover,
        }
    }
}
