pub mod delete;
pub mod get_head;
pub mod mkcol;
pub mod r#move;
pub mod options;
pub mod put;
