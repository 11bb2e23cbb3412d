pub mod config;
pub mod err;
pub mod parse;
pub mod session;
pub mod state;
pub mod terminal;
