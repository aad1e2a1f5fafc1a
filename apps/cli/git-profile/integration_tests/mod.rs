mod app;
mod helpers;
mod loader;
