// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use lofty::{
    mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File},
    picture::MimeType,
};

use retag_core::{CoverImage, Field, MetadataRequest};

use crate::io::update::Updater;

const COVER_IDENT: AtomIdent<'static> = AtomIdent::Fourcc(*b"covr");

pub(crate) const fn field_ident(field: Field) -> AtomIdent<'static> {
    let fourcc = match field {
        Field::Title => *b"\xa9nam",
        Field::Artist => *b"\xa9ART",
        Field::Album => *b"\xa9alb",
        Field::Year => *b"\xa9day",
        Field::Genre => *b"\xa9gen",
    };
    AtomIdent::Fourcc(fourcc)
}

pub(crate) fn export_metadata_to_file(
    updater: &mut Updater<'_>,
    mp4_file: &mut Mp4File,
    request: &MetadataRequest,
) {
    let mut ilst = mp4_file.ilst_mut().map(std::mem::take).unwrap_or_default();
    export_metadata_to_ilst(updater, &mut ilst, request);
    mp4_file.set_ilst(ilst);
}

pub(crate) fn export_metadata_to_ilst(
    updater: &mut Updater<'_>,
    ilst: &mut Ilst,
    request: &MetadataRequest,
) {
    for (field, text) in request.text_fields() {
        ilst.replace_atom(Atom::new(field_ident(field), AtomData::UTF8(text)));
    }

    let Some(cover_image) = request
        .cover
        .as_ref()
        .and_then(|source| updater.load_cover_image(source))
    else {
        return;
    };
    if let Err(err) = export_cover_image(ilst, &cover_image) {
        updater.add_issue(err);
    }
}

fn export_cover_image(ilst: &mut Ilst, cover_image: &CoverImage) -> Result<(), String> {
    let picture = super::front_cover_picture(cover_image, false);
    // Only these image formats could be tagged in the `covr` atom
    match picture.mime_type() {
        Some(MimeType::Jpeg | MimeType::Png | MimeType::Bmp | MimeType::Gif) => (),
        _ => {
            return Err(format!(
                "Failed to embed cover image of type {media_type}",
                media_type = cover_image.media_type
            ));
        }
    }
    // Replaces all existing cover images
    ilst.replace_atom(Atom::new(COVER_IDENT, AtomData::Picture(picture)));
    Ok(())
}
