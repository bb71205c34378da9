use std::sync::Arc;

use salvo::async_trait;
use tanto_core::error::CoreError;
use tanto_service::library::Library;

use crate::error::AppResult;

/// Injects the library a router is mounted for.
pub struct LibraryHandler {
    pub library: Arc<Library>,
}

#[async_trait]
impl salvo::Handler for LibraryHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl), fields(library = %self.library.name()))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.library));
    }
}

/// ## Summary
/// Retrieves the mounted library from the depot.
///
/// ## Errors
/// Returns an error if no [`LibraryHandler`] ran for this request.
pub fn get_library_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Library>> {
    depot
        .obtain::<Arc<Library>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Library not found in depot").into())
}
