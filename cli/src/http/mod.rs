//! HTTP服务模块：电影资源 API

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use state::AppState;
