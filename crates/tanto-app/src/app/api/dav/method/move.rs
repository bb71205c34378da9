//! MOVE method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::{dav_context, destination_path};
use crate::error::AppResult;

/// ## Summary
/// Moves a resource to the `Destination` inside the same library.
///
/// ## Side Effects
/// Replaces an existing file at the destination. Returns 201 when the
/// destination was created, 204 when it was replaced.
///
/// ## Errors
/// Answers 400 for a missing or foreign `Destination`, 403 without Rename on
/// either path, 404 if the source is missing, 409 if the destination parent is.
#[handler]
#[tracing::instrument(skip_all, fields(method = "MOVE", path = %req.uri().path()))]
pub async fn r#move(req: &mut Request, res: &mut Response, depot: &Depot) {
    match relocate(req, depot).await {
        Ok(true) => {
            res.status_code(StatusCode::CREATED);
        }
        Ok(false) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.write_to(res),
    }
}

async fn relocate(req: &Request, depot: &Depot) -> AppResult<bool> {
    let ctx = dav_context(req, depot)?;
    let destination = destination_path(req, &ctx.library)?;
    tracing::debug!(from = %ctx.path, to = %destination, "Moving resource");

    Ok(ctx
        .library
        .rename(&ctx.username, &ctx.path, &destination)
        .await?)
}
