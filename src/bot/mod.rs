pub mod bridge;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod gateway;
pub mod service;
pub mod session;
pub mod startup;
pub mod util;
