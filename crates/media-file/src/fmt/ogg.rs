// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use lofty::ogg::{VorbisComments, VorbisFile};

use retag_core::MetadataRequest;

use crate::io::update::Updater;

pub(crate) const COVER_NOT_SUPPORTED_ISSUE: &str =
    "Embedding cover images into Ogg Vorbis files is not supported";

pub(crate) fn export_metadata_to_file(
    updater: &mut Updater<'_>,
    ogg_file: &mut VorbisFile,
    request: &MetadataRequest,
) {
    let mut vorbis_comments = std::mem::take(ogg_file.vorbis_comments_mut());
    export_metadata_to_vorbis_comments(updater, &mut vorbis_comments, request);
    ogg_file.set_vorbis_comments(vorbis_comments);
}

fn export_metadata_to_vorbis_comments(
    updater: &mut Updater<'_>,
    vorbis_comments: &mut VorbisComments,
    request: &MetadataRequest,
) {
    super::vorbis::export_metadata_to_vorbis_comments(vorbis_comments, request);
    // The cover source is neither loaded nor validated
    if request.cover.is_some() {
        updater.add_issue(COVER_NOT_SUPPORTED_ISSUE);
    }
}
