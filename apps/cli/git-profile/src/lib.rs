// Library exports for testing
// The binary (main.rs) imports these as well

pub mod app;
pub mod cli;
pub mod error;
pub mod loader;
pub mod logger;
pub mod remote;
pub mod state;
pub mod token;
pub mod view;

#[cfg(test)]
mod tests;
