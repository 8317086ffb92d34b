pub mod config;
pub mod date_utils;
pub mod element_watch;
pub mod location;
pub mod logging;
pub mod telegram;
pub mod visitor;
