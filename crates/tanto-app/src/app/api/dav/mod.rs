// File verbs served under every library prefix.

use salvo::{Router, http::Method, routing::MethodFilter};

pub mod extract;
pub mod method;

/// ## Summary
/// Method routes for the `{**rest}` path of a library.
///
/// ## Errors
/// Returns an error if a custom method name is invalid.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::new()
        .options(method::options::options)
        .get(method::get_head::get)
        .head(method::get_head::head)
        .put(method::put::put)
        .delete(method::delete::delete)
        .push(
            // MKCOL method
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"MKCOL")?))
                .goal(method::mkcol::mkcol),
        )
        .push(
            // MOVE method
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"MOVE")?))
                .goal(method::r#move::r#move),
        ))
}
