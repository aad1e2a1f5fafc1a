mod error;
mod logger;
mod remote;
mod state;
mod view;
