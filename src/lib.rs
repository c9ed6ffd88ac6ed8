// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Edit descriptive metadata and cover art of audio files.
//!
//! Re-exports the sub-crates of the workspace, depending on the
//! enabled features.

pub use retag_core::*;

#[cfg(feature = "json")]
pub use retag_core_json as json;

#[cfg(feature = "media-file")]
pub use retag_media_file as media_file;
