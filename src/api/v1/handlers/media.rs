/*
 * Responsibility
 * - PUT /post-image handler (multipart 受け取り → intake → gateway)
 * - 応答契約: 200 "No file provided." / 201 "File stored." + filePath
 */
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use crate::{
    api::v1::{dto::media::UploadResponse, extractors::TrustCtx},
    error::AppError,
    services::media::{
        gateway::{self, UploadOutcome},
        intake::{self, RawFile},
    },
    state::AppState,
};

/// multipart fields: 1 つの file part (`image`) + 任意の text field (`oldPath`)
pub async fn put_post_image(
    State(state): State<AppState>,
    TrustCtx(trust): TrustCtx,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut file: Option<RawFile> = None;
    let mut old_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let original_name = field.file_name().unwrap_or("upload").to_owned();
                let media_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;

                file = Some(RawFile {
                    original_name,
                    media_type,
                    bytes,
                });
            }
            "oldPath" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
                old_path = Some(value).filter(|v| !v.trim().is_empty());
            }
            _ => {}
        }
    }

    let intake = intake::screen(file);
    let outcome = gateway::handle_upload(state.media.clone(), &trust, intake, old_path).await?;

    Ok(match outcome {
        UploadOutcome::NoFile => (
            StatusCode::OK,
            Json(UploadResponse {
                message: "No file provided.",
                file_path: None,
            }),
        ),
        UploadOutcome::Stored { path } => (
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "File stored.",
                file_path: Some(path),
            }),
        ),
    })
}
