pub mod app;
pub mod coerce;
pub mod config;
pub mod errors;
pub mod goal;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use state::{AppState, Tracker};
pub use storage::FileStore;
