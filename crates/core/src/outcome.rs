// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Why updating the metadata of a file has been rejected or failed.
///
/// None of these is fatal for the caller, the file is left as is
/// unless the failure occurred while saving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    UnrecognizedFormat,
    UnsupportedFormat,
    AdapterFailure,
}
