//! GET and HEAD method handlers.

use salvo::http::{HeaderValue, StatusCode};
use salvo::{Depot, Request, Response, handler};
use tanto_service::library::EntryInfo;

use crate::app::api::dav::extract::dav_context;
use crate::error::AppResult;

const LISTING_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// ## Summary
/// Serves a file, or a plain-text listing for a directory.
///
/// Listings show one entry per line, directories suffixed with `/`, and only
/// entries the user may read.
///
/// ## Errors
/// Answers 403 without Read, 404 if nothing exists at the path.
#[handler]
#[tracing::instrument(skip_all, fields(method = "GET", path = %req.uri().path()))]
pub async fn get(req: &mut Request, res: &mut Response, depot: &Depot) {
    if let Err(e) = serve(req, depot, res, false).await {
        e.write_to(res);
    }
}

/// ## Summary
/// Like `GET`, without a body.
#[handler]
#[tracing::instrument(skip_all, fields(method = "HEAD", path = %req.uri().path()))]
pub async fn head(req: &mut Request, res: &mut Response, depot: &Depot) {
    if let Err(e) = serve(req, depot, res, true).await {
        e.write_to(res);
    }
}

async fn serve(req: &Request, depot: &Depot, res: &mut Response, is_head: bool) -> AppResult<()> {
    let ctx = dav_context(req, depot)?;
    let entry = ctx.library.stat(&ctx.username, &ctx.path).await?;

    if entry.is_dir {
        let entries = ctx.library.read_dir(&ctx.username, &ctx.path).await?;
        set_content_type(res, LISTING_CONTENT_TYPE);
        res.status_code(StatusCode::OK);
        if !is_head && let Err(e) = res.write_body(render_listing(&entries)) {
            tracing::error!("Failed to write response body: {}", e);
        }
        return Ok(());
    }

    set_content_type(res, FILE_CONTENT_TYPE);
    res.status_code(StatusCode::OK);
    if is_head {
        #[expect(
            clippy::let_underscore_must_use,
            reason = "Header addition failure is non-fatal"
        )]
        let _ = res.add_header("Content-Length", entry.len.to_string(), true);
        return Ok(());
    }

    let body = ctx.library.read_file(&ctx.username, &ctx.path).await?;
    if let Err(e) = res.write_body(body) {
        tracing::error!("Failed to write response body: {}", e);
    }
    Ok(())
}

fn set_content_type(res: &mut Response, value: &'static str) {
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header("Content-Type", HeaderValue::from_static(value), true);
}

fn render_listing(entries: &[EntryInfo]) -> String {
    let mut listing = String::new();
    for entry in entries {
        listing.push_str(&entry.name);
        if entry.is_dir {
            listing.push('/');
        }
        listing.push('\n');
    }
    listing
}
