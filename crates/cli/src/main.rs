// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    io::{Write as _, stdout},
    process::ExitCode,
};

use clap::{Arg, ArgAction, Command};

use retag_core_json::outcome::UpdateResult;
use retag_media_file::{io::update::UpdateConfig, util::cover::CoverMediaType};

mod command;

use self::command::MetadataSource;

const DEFAULT_LOG_FILTER: &str = "info";

const FILE_PATH_ARG: &str = "file-path";

const METADATA_JSON_ARG: &str = "metadata-json";

const METADATA_FILE_ARG: &str = "metadata-file";

const SNIFF_COVER_TYPE_ARG: &str = "sniff-cover-type";

const PROBE_ARG: &str = "probe";

fn new_command() -> Command {
    Command::new("retag")
        .about("Writes descriptive metadata and cover art into audio files")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(FILE_PATH_ARG)
                .help("The audio file that is modified in place")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new(METADATA_JSON_ARG)
                .help("The metadata as a JSON object")
                .num_args(1)
                .required(false),
        )
        .arg(
            Arg::new(METADATA_FILE_ARG)
                .long(METADATA_FILE_ARG)
                .help("Read the metadata from a JSON file instead")
                .num_args(1)
                .required(false),
        )
        .arg(
            Arg::new(SNIFF_COVER_TYPE_ARG)
                .long(SNIFF_COVER_TYPE_ARG)
                .help("Detect the image format of the cover instead of assuming JPEG")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(PROBE_ARG)
                .long(PROBE_ARG)
                .help("Only detect the audio format without modifying the file")
                .action(ArgAction::SetTrue)
                .conflicts_with_all([METADATA_JSON_ARG, METADATA_FILE_ARG]),
        )
}

fn print_result(result: &UpdateResult) -> std::io::Result<()> {
    let mut stdout = stdout().lock();
    serde_json::to_writer(&mut stdout, result)?;
    writeln!(stdout)?;
    stdout.flush()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let matches = new_command().get_matches();
    let Some(file_path) = matches.get_one::<String>(FILE_PATH_ARG) else {
        // Unreachable for a required argument
        return ExitCode::FAILURE;
    };

    let result = if matches.get_flag(PROBE_ARG) {
        command::probe_file(file_path)
    } else {
        let source = MetadataSource::select(
            matches
                .get_one::<String>(METADATA_FILE_ARG)
                .map(String::as_str),
            matches
                .get_one::<String>(METADATA_JSON_ARG)
                .map(String::as_str),
        );
        let cover_media_type = if matches.get_flag(SNIFF_COVER_TYPE_ARG) {
            CoverMediaType::Sniff
        } else {
            CoverMediaType::Jpeg
        };
        let config = UpdateConfig { cover_media_type };
        command::update_file(file_path, source.as_ref(), &config)
    };

    if let Err(err) = print_result(&result) {
        log::error!("Failed to print result: {err}");
        return ExitCode::FAILURE;
    }
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
