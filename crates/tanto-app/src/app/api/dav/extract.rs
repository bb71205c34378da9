//! Request context shared by the DAV method handlers.

use std::sync::Arc;

use salvo::http::uri::Uri;
use salvo::{Depot, Request};
use tanto_core::util::path::clean_path;
use tanto_service::library::Library;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::get_identity_from_depot;
use crate::middleware::library::get_library_from_depot;

/// The library, user and library path a request operates on.
#[derive(Debug, Clone)]
pub struct DavContext {
    pub library: Arc<Library>,
    pub username: String,
    pub path: String,
}

/// ## Summary
/// Builds the context from the depot and the `{**rest}` route parameter.
///
/// ## Errors
/// Returns an error if the library or the identity is missing from the depot.
pub fn dav_context(req: &Request, depot: &Depot) -> AppResult<DavContext> {
    let library = get_library_from_depot(depot)?;
    let username = get_identity_from_depot(depot)?.username.clone();
    let rest = req.param::<String>("rest").unwrap_or_default();

    Ok(DavContext {
        library,
        username,
        path: clean_path(&rest),
    })
}

/// ## Summary
/// Resolves the `Destination` header of a `MOVE` to a path in `library`.
///
/// Absolute URIs and absolute paths are accepted. The path is not
/// percent-decoded.
///
/// ## Errors
/// Returns `BadRequest` if the header is missing, unparsable or points
/// outside `library`.
pub fn destination_path(req: &Request, library: &Library) -> AppResult<String> {
    let value = req
        .headers()
        .get("Destination")
        .ok_or_else(|| AppError::BadRequest("missing Destination header".to_string()))?
        .to_str()
        .map_err(|e| AppError::BadRequest(format!("invalid Destination header: {e}")))?;

    let uri: Uri = value
        .parse()
        .map_err(|e| AppError::BadRequest(format!("invalid Destination URI: {e}")))?;

    library.strip_prefix(uri.path()).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Destination {value} is outside library {}",
            library.name()
        ))
    })
}
