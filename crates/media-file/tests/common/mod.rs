// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Minimal audio files that are generated on the fly.

#![allow(dead_code)]

use std::{fs::File, io::Write as _, path::Path};

use lofty::{
    config::ParseOptions, file::AudioFile, flac::FlacFile, mp4::Mp4File, ogg::VorbisFile,
};
use tempfile::NamedTempFile;

/// Opaque bytes that follow the metadata and must never be touched.
pub const FLAC_AUDIO_FRAMES: &[u8] = b"\xff\xf8\x69\x08\x00\x00\x00\x00audio frames";

const FLAC_LAST_BLOCK_FLAG: u8 = 0x80;

fn flac_block(block_type: u8, is_last: bool, content: &[u8]) -> Vec<u8> {
    let header_byte = if is_last {
        FLAC_LAST_BLOCK_FLAG | block_type
    } else {
        block_type
    };
    let len = u32::try_from(content.len()).unwrap().to_be_bytes();
    let mut block = vec![header_byte, len[1], len[2], len[3]];
    block.extend_from_slice(content);
    block
}

fn flac_stream_info(is_last: bool) -> Vec<u8> {
    // Min/max block size
    let mut content = vec![0x10, 0x00, 0x10, 0x00];
    // Min/max frame size (unknown)
    content.extend_from_slice(&[0x00; 6]);
    // 44100 Hz, 2 channels, 16 bits per sample
    content.extend_from_slice(&[0x0a, 0xc4, 0x42, 0xf0]);
    // Total samples (unknown)
    content.extend_from_slice(&[0x00; 4]);
    // MD5 signature (unknown)
    content.extend_from_slice(&[0x00; 16]);
    flac_block(0, is_last, &content)
}

/// Vorbis comments without framing bit, as embedded into FLAC.
fn vorbis_comment_content(vendor: &str, comments: &[&str]) -> Vec<u8> {
    let mut content = u32::try_from(vendor.len())
        .unwrap()
        .to_le_bytes()
        .to_vec();
    content.extend_from_slice(vendor.as_bytes());
    content.extend_from_slice(&u32::try_from(comments.len()).unwrap().to_le_bytes());
    for comment in comments {
        content.extend_from_slice(&u32::try_from(comment.len()).unwrap().to_le_bytes());
        content.extend_from_slice(comment.as_bytes());
    }
    content
}

fn flac_vorbis_comment(is_last: bool) -> Vec<u8> {
    flac_block(
        4,
        is_last,
        &vorbis_comment_content("reference libFLAC 1.4.3", &["TITLE=Old Title", "COMMENT=Keep me"]),
    )
}

fn flac_stream_from_blocks(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = b"fLaC".to_vec();
    for block in blocks {
        stream.extend_from_slice(block);
    }
    stream.extend_from_slice(FLAC_AUDIO_FRAMES);
    stream
}

/// A FLAC stream with a single STREAMINFO block.
pub fn flac_stream() -> Vec<u8> {
    flac_stream_from_blocks(&[flac_stream_info(true)])
}

/// A FLAC stream that ends with a VORBIS_COMMENT block.
pub fn flac_stream_with_trailing_vorbis_comment() -> Vec<u8> {
    flac_stream_from_blocks(&[flac_stream_info(false), flac_vorbis_comment(true)])
}

/// A FLAC stream that ends with a PADDING block.
pub fn flac_stream_with_trailing_padding() -> Vec<u8> {
    flac_stream_from_blocks(&[
        flac_stream_info(false),
        flac_vorbis_comment(false),
        flac_block(1, true, &[0x00; 16]),
    ])
}

/// All supported layouts of FLAC metadata blocks.
pub fn flac_streams() -> [(&'static str, Vec<u8>); 3] {
    [
        ("STREAMINFO", flac_stream()),
        ("VORBIS_COMMENT", flac_stream_with_trailing_vorbis_comment()),
        ("PADDING", flac_stream_with_trailing_padding()),
    ]
}

/// The bytes that follow the last metadata block.
pub fn flac_audio_frames(stream: &[u8]) -> &[u8] {
    assert!(stream.starts_with(b"fLaC"));
    let mut offset = 4;
    loop {
        let header = &stream[offset..offset + 4];
        let len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        offset += 4 + len;
        if header[0] & FLAC_LAST_BLOCK_FLAG != 0 {
            return &stream[offset..];
        }
    }
}

const OGG_HEADER_TYPE_FIRST_PAGE: u8 = 0x02;
const OGG_HEADER_TYPE_LAST_PAGE: u8 = 0x04;

const OGG_STREAM_SERIAL: u32 = 0x1234_5678;

/// CRC-32 with polynomial 0x04c11db7, no reflection and zero init.
fn ogg_crc32(page: &[u8]) -> u32 {
    page.iter().fold(0, |crc, byte| {
        (0..8).fold(crc ^ (u32::from(*byte) << 24), |crc, _| {
            if crc & 0x8000_0000 == 0 {
                crc << 1
            } else {
                (crc << 1) ^ 0x04c1_1db7
            }
        })
    })
}

/// An Ogg page that contains the given complete packets.
pub fn ogg_page(header_type: u8, sequence_number: u32, packets: &[&[u8]]) -> Vec<u8> {
    let mut segments = Vec::new();
    for packet in packets {
        segments.extend(std::iter::repeat_n(0xff, packet.len() / 255));
        segments.push(u8::try_from(packet.len() % 255).unwrap());
    }
    let mut page = b"OggS\x00".to_vec();
    page.push(header_type);
    // Granule position
    page.extend_from_slice(&0_u64.to_le_bytes());
    page.extend_from_slice(&OGG_STREAM_SERIAL.to_le_bytes());
    page.extend_from_slice(&sequence_number.to_le_bytes());
    // Checksum, calculated below
    page.extend_from_slice(&[0x00; 4]);
    page.push(u8::try_from(segments.len()).unwrap());
    page.extend_from_slice(&segments);
    for packet in packets {
        page.extend_from_slice(packet);
    }
    let checksum = ogg_crc32(&page);
    page[22..26].copy_from_slice(&checksum.to_le_bytes());
    page
}

/// The first page of an Ogg stream that only contains the given packet.
pub fn ogg_first_page(packet: &[u8]) -> Vec<u8> {
    ogg_page(OGG_HEADER_TYPE_FIRST_PAGE, 0, &[packet])
}

/// Opaque payload of the last page that must survive all updates.
pub const OGG_AUDIO_PACKET: &[u8] = b"\x00\x2a audio packet";

fn vorbis_ident_packet() -> Vec<u8> {
    let mut packet = b"\x01vorbis".to_vec();
    // Version
    packet.extend_from_slice(&0_u32.to_le_bytes());
    // Channels
    packet.push(2);
    packet.extend_from_slice(&44_100_u32.to_le_bytes());
    // Maximum, nominal and minimum bitrate
    packet.extend_from_slice(&0_i32.to_le_bytes());
    packet.extend_from_slice(&128_000_i32.to_le_bytes());
    packet.extend_from_slice(&0_i32.to_le_bytes());
    // Block sizes 256 and 2048
    packet.push(0xb8);
    // Framing bit
    packet.push(0x01);
    packet
}

fn vorbis_comment_packet() -> Vec<u8> {
    let mut packet = b"\x03vorbis".to_vec();
    packet.extend_from_slice(&vorbis_comment_content(
        "Xiph.Org libVorbis I 20200704",
        &["ARTIST=Old Artist", "COMMENT=Keep me"],
    ));
    // Framing bit
    packet.push(0x01);
    packet
}

/// An Ogg Vorbis stream with the three header packets on separate
/// pages followed by a single audio page.
pub fn ogg_vorbis_stream() -> Vec<u8> {
    let mut stream = ogg_first_page(&vorbis_ident_packet());
    stream.extend_from_slice(&ogg_page(0, 1, &[vorbis_comment_packet().as_slice()]));
    stream.extend_from_slice(&ogg_page(0, 2, &[b"\x05vorbis\x00\x00\x00\x00\x01".as_slice()]));
    stream.extend_from_slice(&ogg_page(OGG_HEADER_TYPE_LAST_PAGE, 3, &[OGG_AUDIO_PACKET]));
    stream
}

/// Checks that all pages are in sequence with valid checksums.
pub fn assert_valid_ogg_pages(stream: &[u8]) {
    let mut offset = 0;
    let mut sequence_number = 0;
    while offset < stream.len() {
        let page_start = &stream[offset..];
        assert!(page_start.starts_with(b"OggS"));
        assert_eq!(
            sequence_number,
            u32::from_le_bytes(page_start[18..22].try_into().unwrap())
        );
        let segment_count = usize::from(page_start[26]);
        let header_len = 27 + segment_count;
        let content_len = page_start[27..header_len]
            .iter()
            .map(|len| usize::from(*len))
            .sum::<usize>();
        let mut page = page_start[..header_len + content_len].to_vec();
        let checksum = u32::from_le_bytes(page[22..26].try_into().unwrap());
        page[22..26].copy_from_slice(&[0x00; 4]);
        assert_eq!(ogg_crc32(&page), checksum);
        offset += page.len();
        sequence_number += 1;
    }
}

fn mp4_atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut atom = u32::try_from(8 + content.len())
        .unwrap()
        .to_be_bytes()
        .to_vec();
    atom.extend_from_slice(fourcc);
    atom.extend_from_slice(content);
    atom
}

fn mp4_ftyp() -> Vec<u8> {
    mp4_atom(b"ftyp", b"M4A \x00\x00\x00\x00M4A isom")
}

/// The `ftyp` and `free` atoms of an M4A file without any media.
pub fn mp4_header() -> Vec<u8> {
    let mut header = mp4_ftyp();
    header.extend_from_slice(&mp4_atom(b"free", &[0x00; 8]));
    header
}

/// Media data that must survive all updates.
pub fn mp4_media_data() -> Vec<u8> {
    mp4_atom(b"mdat", b"\x21\x10\x05\x20\xa4\x1b\xff\xc0 media data")
}

/// An M4A file with a `moov` atom that only contains the movie header
/// and is followed by the media data.
pub fn mp4_file() -> Vec<u8> {
    let mut mvhd = Vec::new();
    // Version and flags
    mvhd.extend_from_slice(&[0x00; 4]);
    // Creation and modification time
    mvhd.extend_from_slice(&[0x00; 8]);
    // Time scale
    mvhd.extend_from_slice(&1000_u32.to_be_bytes());
    // Duration
    mvhd.extend_from_slice(&0_u32.to_be_bytes());
    // Rate 1.0 and volume 1.0
    mvhd.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x01, 0x00]);
    // Reserved
    mvhd.extend_from_slice(&[0x00; 10]);
    // Unity matrix
    for value in [0x0001_0000_u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        mvhd.extend_from_slice(&value.to_be_bytes());
    }
    // Pre-defined
    mvhd.extend_from_slice(&[0x00; 24]);
    // Next track ID
    mvhd.extend_from_slice(&1_u32.to_be_bytes());

    let mut file = mp4_ftyp();
    file.extend_from_slice(&mp4_atom(b"moov", &mp4_atom(b"mvhd", &mvhd)));
    file.extend_from_slice(&mp4_media_data());
    file
}

pub fn wave_header() -> Vec<u8> {
    let mut header = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
    header.resize(44, 0);
    header
}

pub fn aiff_header() -> Vec<u8> {
    let mut header = b"FORM\x00\x00\x00\x2eAIFFCOMM".to_vec();
    header.resize(54, 0);
    header
}

pub fn temp_file_with_contents(contents: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn parse_options() -> ParseOptions {
    ParseOptions::new().read_properties(false)
}

pub fn read_flac_file(path: &Path) -> FlacFile {
    let mut file = File::open(path).unwrap();
    <FlacFile as AudioFile>::read_from(&mut file, parse_options()).unwrap()
}

pub fn read_mp4_file(path: &Path) -> Mp4File {
    let mut file = File::open(path).unwrap();
    <Mp4File as AudioFile>::read_from(&mut file, parse_options()).unwrap()
}

pub fn read_vorbis_file(path: &Path) -> VorbisFile {
    let mut file = File::open(path).unwrap();
    <VorbisFile as AudioFile>::read_from(&mut file, parse_options()).unwrap()
}
