pub mod handle_session;
pub mod input;
pub mod presentation;
pub mod race_catalog;
pub mod race_mod;
pub mod state_handler;
