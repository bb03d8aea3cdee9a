/*
 * Responsibility
 * - upload の gate: 信頼判定 → intake 分岐 → 旧 asset の後始末 → 永続化
 * - 分岐の評価順そのものが外部契約 (trust gate は filesystem より先)
 */
use std::sync::Arc;

use thiserror::Error;

use crate::services::auth::TrustDecision;
use crate::services::media::intake::FileIntake;
use crate::services::media::store::{self, MediaStore, StoreError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Successful gateway outcomes. `NoFile` is a valid acknowledgement, not an
/// error; a client may invoke the route as a no-op probe.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored { path: String },
    NoFile,
}

/// Accept an upload for a trusted request.
///
/// The trust gate runs before any filesystem interaction. The delete of a
/// superseded path is best-effort and detached: it is always issued when a
/// new asset is stored, and its failure never reaches the result.
pub async fn handle_upload(
    store: Arc<dyn MediaStore>,
    trust: &TrustDecision,
    intake: FileIntake,
    previous_path: Option<String>,
) -> Result<UploadOutcome, GatewayError> {
    if !trust.is_authenticated() {
        return Err(GatewayError::Unauthenticated);
    }

    let file = match intake {
        FileIntake::Accepted(file) => file,
        FileIntake::Absent => return Ok(UploadOutcome::NoFile),
        FileIntake::Rejected { media_type } => {
            // Screened-out uploads answer exactly like "no file" on the wire;
            // the distinction only reaches the log.
            tracing::warn!(%media_type, "upload rejected by media-type allow-list");
            return Ok(UploadOutcome::NoFile);
        }
    };

    if let Some(previous) = previous_path {
        retire(Arc::clone(&store), previous);
    }

    let name = store::unique_name(&file.original_name);
    let path = store.put(&name, &file.bytes).await.map_err(|err| {
        tracing::error!(error = %err, name = %name, "failed to persist upload");
        err
    })?;

    tracing::info!(
        path = %path,
        subject = trust.subject_id().unwrap_or_default(),
        "stored asset"
    );

    Ok(UploadOutcome::Stored { path })
}

// Best-effort, fire-and-forget: failure is observability data only.
fn retire(store: Arc<dyn MediaStore>, storage_path: String) {
    tokio::spawn(async move {
        if let Err(err) = store.remove(&storage_path).await {
            tracing::warn!(error = %err, path = %storage_path, "failed to remove superseded asset");
        }
    });
}
