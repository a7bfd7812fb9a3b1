pub mod app;
pub mod auth;
pub mod calendar;
pub mod compare;
pub mod config;
pub mod errors;
pub mod grouping;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod profile;
pub mod records;
pub mod roster;
pub mod state;
pub mod stats;
pub mod storage;
pub mod table;
pub mod trend;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_members;
