//! Resolves the client address used for per-address banning.

use std::net::IpAddr;

use salvo::Depot;
use tanto_service::guard::AddressKey;

/// ## Summary
/// Stores the client's [`AddressKey`] in the depot.
///
/// The peer address of the connection is used unless `trust_forwarded_for` is
/// set, in which case the first `X-Forwarded-For` entry (or `X-Real-IP`) wins.
/// Unresolvable addresses become [`AddressKey::UNKNOWN`].
pub struct ClientAddrMiddleware {
    pub trust_forwarded_for: bool,
}

#[salvo::async_trait]
impl salvo::Handler for ClientAddrMiddleware {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let ip = self
            .trust_forwarded_for
            .then(|| forwarded_ip(req))
            .flatten()
            .or_else(|| peer_ip(req));

        tracing::trace!(ip = ?ip, "Client address resolved");
        depot.inject(AddressKey::from_ip(ip));
    }
}

fn forwarded_ip(req: &salvo::Request) -> Option<IpAddr> {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

    header("X-Forwarded-For")
        .and_then(|list| list.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or_else(|| header("X-Real-IP").and_then(|ip| ip.trim().parse().ok()))
}

fn peer_ip(req: &salvo::Request) -> Option<IpAddr> {
    let addr = req.remote_addr();
    addr.as_ipv4()
        .map(|v4| IpAddr::V4(*v4.ip()))
        .or_else(|| addr.as_ipv6().map(|v6| IpAddr::V6(*v6.ip())))
}

/// Client address resolved by [`ClientAddrMiddleware`]; unknown if it did not run.
#[must_use]
pub fn get_client_address_from_depot(depot: &Depot) -> AddressKey {
    depot
        .obtain::<AddressKey>()
        .copied()
        .unwrap_or(AddressKey::UNKNOWN)
}
