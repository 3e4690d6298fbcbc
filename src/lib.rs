pub mod api;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod view;
