// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs::File,
    io::{Cursor, Read as _, Seek as _, Write as _},
};

use anyhow::anyhow;
use lofty::{
    config::WriteOptions, file::AudioFile as _, flac::FlacFile, ogg::OggPictureStorage as _,
    picture::PictureInformation,
};

use retag_core::MetadataRequest;

use crate::{Error, Result, io::update::Updater};

const STREAM_MARKER: &[u8] = b"fLaC";

const ID3V2_MARKER: &[u8] = b"ID3";

const ID3V2_HEADER_LEN: usize = 10;

const ID3V2_FOOTER_FLAG: u8 = 0x10;

const BLOCK_HEADER_LEN: usize = 4;

const LAST_BLOCK_FLAG: u8 = 0x80;

const BLOCK_TYPE_MASK: u8 = 0x7f;

const BLOCK_TYPE_PADDING: u8 = 1;

/// Size of the PADDING block that is appended if missing.
const TRAILING_PADDING_LEN: u32 = 1024;

pub(crate) fn export_metadata_to_file(
    updater: &mut Updater<'_>,
    flac_file: &mut FlacFile,
    request: &MetadataRequest,
) {
    let mut vorbis_comments = flac_file
        .vorbis_comments_mut()
        .map(std::mem::take)
        .unwrap_or_default();
    super::vorbis::export_metadata_to_vorbis_comments(&mut vorbis_comments, request);
    flac_file.set_vorbis_comments(vorbis_comments);

    let Some(cover_image) = request
        .cover
        .as_ref()
        .and_then(|source| updater.load_cover_image(source))
    else {
        return;
    };
    let picture = super::front_cover_picture(&cover_image, true);
    // Dimensions and color depth are only available for valid images
    let picture_info = PictureInformation::from_picture(&picture).unwrap_or_default();
    let replaced_pictures = flac_file.remove_pictures();
    if !replaced_pictures.is_empty() {
        log::debug!(
            "Replacing {num_pictures} existing picture(s)",
            num_pictures = replaced_pictures.len()
        );
    }
    if let Err(err) = flac_file.insert_picture(picture, Some(picture_info)) {
        updater.add_issue(format!("Failed to embed cover image: {err}"));
    }
}

fn truncated_metadata() -> Error {
    Error::Metadata(anyhow!("truncated FLAC metadata block"))
}

/// Offset of the first metadata block header, i.e. after the
/// stream marker and an optional leading ID3v2 tag.
fn first_block_offset(stream: &[u8]) -> Result<usize> {
    let mut offset = 0;
    if stream.starts_with(ID3V2_MARKER) {
        let header = stream
            .get(..ID3V2_HEADER_LEN)
            .ok_or_else(|| Error::Metadata(anyhow!("truncated ID3v2 header")))?;
        // Synchsafe integer with 7 significant bits per byte
        let tag_len = header[6..]
            .iter()
            .fold(0, |len, byte| (len << 7) | usize::from(byte & 0x7f));
        offset = ID3V2_HEADER_LEN + tag_len;
        if header[5] & ID3V2_FOOTER_FLAG != 0 {
            offset += ID3V2_HEADER_LEN;
        }
    }
    if stream.get(offset..).is_none_or(|rest| !rest.starts_with(STREAM_MARKER)) {
        return Err(Error::Metadata(anyhow!("missing FLAC stream marker")));
    }
    Ok(offset + STREAM_MARKER.len())
}

/// Make sure that the last metadata block is a PADDING block.
///
/// Otherwise the former last block loses its flag and a new PADDING
/// block is inserted after it. The audio frames are not modified.
///
/// Returns `true` if the stream has been modified.
pub(crate) fn ensure_trailing_padding(stream: &mut Vec<u8>) -> Result<bool> {
    let mut offset = first_block_offset(stream)?;
    loop {
        let header = stream
            .get(offset..offset + BLOCK_HEADER_LEN)
            .ok_or_else(truncated_metadata)?;
        let is_last = header[0] & LAST_BLOCK_FLAG != 0;
        let block_type = header[0] & BLOCK_TYPE_MASK;
        let block_len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let block_end = offset + BLOCK_HEADER_LEN + block_len;
        if block_end > stream.len() {
            return Err(truncated_metadata());
        }
        if !is_last {
            offset = block_end;
            continue;
        }
        if block_type == BLOCK_TYPE_PADDING {
            return Ok(false);
        }
        stream[offset] &= !LAST_BLOCK_FLAG;
        let mut padding = vec![0; BLOCK_HEADER_LEN + TRAILING_PADDING_LEN as usize];
        padding[0] = LAST_BLOCK_FLAG | BLOCK_TYPE_PADDING;
        padding[1..BLOCK_HEADER_LEN].copy_from_slice(&TRAILING_PADDING_LEN.to_be_bytes()[1..]);
        stream.splice(block_end..block_end, padding);
        return Ok(true);
    }
}

/// Save the metadata of a FLAC file.
///
/// The whole stream is rewritten in memory first and the file is only
/// touched if saving succeeded.
pub(crate) fn save_to_file(
    flac_file: &FlacFile,
    file: &mut File,
    write_options: WriteOptions,
) -> Result<()> {
    file.rewind()?;
    let mut stream = Vec::new();
    file.read_to_end(&mut stream)?;
    if ensure_trailing_padding(&mut stream)? {
        log::debug!("Appended PADDING block to FLAC metadata");
    }
    let mut cursor = Cursor::new(stream);
    flac_file.save_to(&mut cursor, write_options)?;
    let stream = cursor.into_inner();
    file.rewind()?;
    file.write_all(&stream)?;
    file.set_len(stream.len() as u64)?;
    file.flush()?;
    Ok(())
}
