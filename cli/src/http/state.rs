//! 服务器共享状态

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use reel_core::api::MovieRepository;

#[derive(Clone)]
pub struct AppState {
    pub session_id: String,
    pub movies: Arc<dyn MovieRepository>,
    pub stats: Arc<RwLock<ServerStats>>,
}

impl AppState {
    pub fn new(session_id: String, movies: Arc<dyn MovieRepository>) -> Self {
        Self {
            session_id,
            movies,
            stats: Arc::new(RwLock::new(ServerStats::new())),
        }
    }

    pub fn record_request(&self) {
        self.stats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .increment_request();
    }

    pub fn snapshot(&self) -> (u64, u64) {
        let stats = self.stats.read().unwrap_or_else(PoisonError::into_inner);
        (stats.uptime_seconds(), stats.requests_total)
    }
}

/// 请求统计（固定大小，不按路径记录）
#[derive(Debug)]
pub struct ServerStats {
    started_at: Instant,
    pub requests_total: u64,
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            requests_total: 0,
        }
    }

    pub fn increment_request(&mut self) {
        self.requests_total += 1;
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
