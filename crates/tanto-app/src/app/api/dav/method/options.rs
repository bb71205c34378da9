//! OPTIONS method handler.

use salvo::http::{HeaderValue, StatusCode};
use salvo::{Request, Response, handler};
use tanto_core::constants::{ALLOWED_METHODS, DAV_COMPLIANCE};

/// ## Summary
/// Announces the supported methods. Answered without authentication.
///
/// ## Side Effects
/// Sets the `Allow` and `DAV` headers on the response.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn options(req: &mut Request, res: &mut Response) {
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header("Allow", HeaderValue::from_static(ALLOWED_METHODS), true);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header("DAV", HeaderValue::from_static(DAV_COMPLIANCE), true);
    res.status_code(StatusCode::OK);

    tracing::debug!("OPTIONS response sent");
}
