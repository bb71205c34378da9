pub mod dav;

use std::sync::Arc;

use salvo::Router;
use tanto_core::config::{LibraryConfig, Settings};
use tanto_core::util::path::{clean_path, is_within};
use tanto_service::gate::CredentialGate;
use tanto_service::library::Library;

use crate::middleware::{
    auth::AuthMiddleware, client_addr::ClientAddrMiddleware, library::LibraryHandler,
};

/// ## Summary
/// Long-lived server state built once from configuration.
///
/// Routers built from the same state share the ban caches and libraries.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gate: Arc<CredentialGate>,
    pub libraries: Vec<Arc<Library>>,
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// ## Summary
    /// Builds the credential gate and every configured library.
    ///
    /// Scope syntax errors are logged and do not prevent startup.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        warn_overlapping_mounts(&settings.library);

        let libraries = settings
            .library
            .iter()
            .map(|config| {
                let (library, err) = Library::from_config(settings, config);
                if let Some(err) = err {
                    tracing::warn!(library = %config.name, error = %err, "Library scopes contain errors");
                }
                tracing::info!(
                    library = %config.name,
                    mount_point = %config.mount_point,
                    prefix = %config.prefix,
                    "Library mounted"
                );
                Arc::new(library)
            })
            .collect();

        Self {
            gate: Arc::new(CredentialGate::new(settings)),
            libraries,
            trust_forwarded_for: settings.server.trust_forwarded_for,
        }
    }
}

fn warn_overlapping_mounts(libraries: &[LibraryConfig]) {
    for (idx, a) in libraries.iter().enumerate() {
        for b in &libraries[idx + 1..] {
            let (pa, pb) = (clean_path(&a.mount_point), clean_path(&b.mount_point));
            if is_within(&pa, &pb) || is_within(&pb, &pa) {
                tracing::warn!(
                    first = %a.name,
                    second = %b.name,
                    "Library mount points overlap"
                );
            }
        }
    }
}

/// ## Summary
/// Constructs the main router: one child router per library at its prefix.
///
/// Libraries mounted at the root prefix are tried last.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes(state: &AppState) -> anyhow::Result<Router> {
    let mut libraries: Vec<&Arc<Library>> = state.libraries.iter().collect();
    libraries.sort_by_key(|library| library.prefix().is_empty());

    let mut router = Router::new()
        .hoop(ClientAddrMiddleware {
            trust_forwarded_for: state.trust_forwarded_for,
        })
        .hoop(AuthMiddleware::new(Arc::clone(&state.gate)));

    for library in libraries {
        let base = if library.prefix().is_empty() {
            Router::new()
        } else {
            Router::with_path(library.prefix())
        };
        router = router.push(
            base.hoop(LibraryHandler {
                library: Arc::clone(library),
            })
            .push(Router::with_path("{**rest}").push(dav::routes()?)),
        );
    }

    Ok(router)
}
