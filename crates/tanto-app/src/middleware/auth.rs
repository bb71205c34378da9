use std::sync::Arc;

use salvo::Depot;
use salvo::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use salvo::http::{HeaderValue, Method, StatusCode};
use tanto_core::constants::AUTH_REALM;
use tanto_service::error::ServiceError;
use tanto_service::gate::{CredentialGate, GateOutcome, Identity};

use super::client_addr::get_client_address_from_depot;
use crate::error::{AppError, AppResult};

/// ## Summary
/// Authentication middleware running the credential gate for each request.
///
/// `OPTIONS` requests pass without credentials.
///
/// ## Side Effects
/// Injects the authenticated [`Identity`] into the depot for downstream handlers.
///
/// ## Errors
/// Answers `401 Unauthorized` with a Basic challenge and stops the chain when the
/// gate rejects the request. The reason is only logged.
pub struct AuthMiddleware {
    gate: Arc<CredentialGate>,
}

impl AuthMiddleware {
    #[must_use]
    pub const fn new(gate: Arc<CredentialGate>) -> Self {
        Self { gate }
    }
}

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == Method::OPTIONS {
            return;
        }

        let address = get_client_address_from_depot(depot);
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match self.gate.check_authorization(address, header) {
            GateOutcome::Granted(identity) => {
                tracing::debug!(username = %identity.username, "User authenticated");
                depot.inject(identity);
            }
            GateOutcome::Rejected(reason) => {
                tracing::info!(%reason, "Authentication rejected");
                challenge(res);
                ctrl.skip_rest();
            }
        }
    }
}

fn challenge(res: &mut salvo::Response) {
    res.status_code(StatusCode::UNAUTHORIZED);
    if let Ok(value) = HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\"")) {
        #[expect(
            clippy::let_underscore_must_use,
            reason = "Header addition failure is non-fatal"
        )]
        let _ = res.add_header(WWW_AUTHENTICATE, value, true);
    }
}

/// ## Summary
/// Retrieves the authenticated user from the depot.
///
/// ## Errors
/// Returns `AuthenticationRejected` if [`AuthMiddleware`] did not authenticate
/// the request.
pub fn get_identity_from_depot(depot: &Depot) -> AppResult<&Identity> {
    depot
        .obtain::<Identity>()
        .map_err(|_err| AppError::ServiceError(ServiceError::AuthenticationRejected))
}
