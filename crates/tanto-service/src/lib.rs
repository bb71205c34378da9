pub mod access;
pub mod error;
pub mod gate;
pub mod guard;
pub mod library;
