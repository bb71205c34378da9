//! DELETE method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::dav_context;
use crate::error::AppResult;

/// ## Summary
/// Removes a file, or a directory and everything below it.
///
/// ## Errors
/// Answers 403 without Delete, 404 if nothing exists, 409 for the library root.
#[handler]
#[tracing::instrument(skip_all, fields(method = "DELETE", path = %req.uri().path()))]
pub async fn delete(req: &mut Request, res: &mut Response, depot: &Depot) {
    match remove(req, depot).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.write_to(res),
    }
}

async fn remove(req: &Request, depot: &Depot) -> AppResult<()> {
    let ctx = dav_context(req, depot)?;
    ctx.library.remove(&ctx.username, &ctx.path).await?;
    Ok(())
}
