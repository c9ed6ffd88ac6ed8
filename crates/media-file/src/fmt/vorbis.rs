// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use lofty::ogg::VorbisComments;

use retag_core::{Field, MetadataRequest};

pub(crate) const fn field_key(field: Field) -> &'static str {
    match field {
        Field::Title => "TITLE",
        Field::Artist => "ARTIST",
        Field::Album => "ALBUM",
        Field::Year => "DATE",
        Field::Genre => "GENRE",
    }
}

/// Replaces the values of all fields that are present in the request.
pub(crate) fn export_metadata_to_vorbis_comments(
    vorbis_comments: &mut VorbisComments,
    request: &MetadataRequest,
) {
    for (field, text) in request.text_fields() {
        vorbis_comments.insert(field_key(field).to_owned(), text);
    }
}
