//! PUT method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};
use tanto_core::constants::MAX_UPLOAD_BYTES;
use tanto_service::access::{FileOperation, OpenMode};

use crate::app::api::dav::extract::dav_context;
use crate::error::{AppError, AppResult};

/// ## Summary
/// Creates or replaces a file with the request body.
///
/// The permission is checked before the body is read.
///
/// ## Errors
/// Answers 403 without Read, Write and `CreateFile`, 409 if the parent
/// directory is missing, 400 if the body cannot be read.
#[handler]
#[tracing::instrument(skip_all, fields(method = "PUT", path = %req.uri().path()))]
pub async fn put(req: &mut Request, res: &mut Response, depot: &Depot) {
    match write(req, depot).await {
        Ok(true) => {
            res.status_code(StatusCode::CREATED);
        }
        Ok(false) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.write_to(res),
    }
}

async fn write(req: &mut Request, depot: &Depot) -> AppResult<bool> {
    let ctx = dav_context(req, depot)?;
    ctx.library.access().check_operation(
        &ctx.username,
        &ctx.path,
        FileOperation::Open(OpenMode::REPLACE),
    )?;

    let body = req
        .payload_with_max_size(MAX_UPLOAD_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read request body: {e}")))?;
    tracing::debug!(bytes = body.len(), "Request body read");

    Ok(ctx.library.write_file(&ctx.username, &ctx.path, body).await?)
}
