mod app;
mod clipboard;
mod effects;
mod guard;
mod routes;
mod ui;

pub use app::run_app;
