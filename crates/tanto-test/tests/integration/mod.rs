mod authentication;
mod authorization;
mod delete;
mod get_head;
mod mkcol;
mod r#move;
mod options;
mod put;
