/*
 * Responsibility
 * - multipart で届いた file part の事前検査 (media type allow-list)
 * - 結果を FileIntake として gateway に渡す (Rejected と Absent を区別する)
 */
use axum::body::Bytes;

/// Media types accepted for upload. Everything else is screened out before
/// the gateway runs.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// A file part as it arrived on the wire, before screening.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub original_name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// Tagged outcome of intake screening. Keeping `Rejected` distinct from
/// `Absent` means the gateway can tell "nothing was sent" from "something was
/// sent and screened out".
#[derive(Debug)]
pub enum FileIntake {
    Accepted(RawFile),
    Rejected { media_type: String },
    Absent,
}

/// Screen an optional incoming file against the media-type allow-list.
pub fn screen(file: Option<RawFile>) -> FileIntake {
    match file {
        None => FileIntake::Absent,
        Some(file) if ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) => {
            FileIntake::Accepted(file)
        }
        Some(file) => FileIntake::Rejected {
            media_type: file.media_type,
        },
    }
}
