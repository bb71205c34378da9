//! MKCOL method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::dav_context;
use crate::error::AppResult;

/// ## Summary
/// Creates a directory.
///
/// ## Errors
/// Answers 403 without `CreateFolder`, 405 if the path exists, 409 if the
/// parent directory is missing.
#[handler]
#[tracing::instrument(skip_all, fields(method = "MKCOL", path = %req.uri().path()))]
pub async fn mkcol(req: &mut Request, res: &mut Response, depot: &Depot) {
    match create(req, depot).await {
        Ok(()) => {
            res.status_code(StatusCode::CREATED);
        }
        Err(e) => e.write_to(res),
    }
}

async fn create(req: &Request, depot: &Depot) -> AppResult<()> {
    let ctx = dav_context(req, depot)?;
    ctx.library.create_dir(&ctx.username, &ctx.path).await?;
    Ok(())
}
