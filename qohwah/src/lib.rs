pub mod core;
pub mod error;
pub mod interfaces;
pub mod post;
pub mod pre;
pub mod sim;
