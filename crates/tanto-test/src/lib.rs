//! Tanto file server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `tanto_test::` paths.

pub mod component {
    pub use tanto_core::{config, constants, util};
    pub use tanto_service::{access, error, gate, guard, library};

    pub mod middleware {
        pub use tanto_app::middleware::*;
    }
}

pub mod app {
    pub use tanto_app::*;

    pub mod api {
        pub use tanto_app::app::api::*;
    }
}
