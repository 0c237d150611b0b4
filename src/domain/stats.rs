//! Pool and user statistics models
//!
//! Snapshots of the state ckpool writes to its log directory. They are built
//! per request and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Merged pool statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub runtime: i64,
    #[serde(rename = "lastupdate")]
    pub last_update: i64,
    pub users: i64,
    pub workers: i64,
    pub idle: i64,
    pub disconnected: i64,
    pub hashrate1m: String,
    pub hashrate5m: String,
    pub hashrate15m: String,
    pub hashrate1hr: String,
    pub hashrate6hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
    pub diff: f64,
    pub accepted: i64,
    pub rejected: i64,
    #[serde(rename = "bestshare")]
    pub best_share: i64,
    pub sps1m: f64,
    pub sps5m: f64,
    pub sps15m: f64,
    pub sps1h: f64,
}

/// First line of `pool.status`: uptime and connection counters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolStatusLine1 {
    pub runtime: i64,
    #[serde(rename = "lastupdate")]
    pub last_update: i64,
    #[serde(rename = "Users")]
    pub users: i64,
    #[serde(rename = "Workers")]
    pub workers: i64,
    #[serde(rename = "Idle")]
    pub idle: i64,
    #[serde(rename = "Disconnected")]
    pub disconnected: i64,
}

/// Second line of `pool.status`: hashrate windows
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolStatusLine2 {
    pub hashrate1m: String,
    pub hashrate5m: String,
    pub hashrate15m: String,
    pub hashrate1hr: String,
    pub hashrate6hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
}

/// Third line of `pool.status`: difficulty and share counters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolStatusLine3 {
    pub diff: f64,
    pub accepted: i64,
    pub rejected: i64,
    #[serde(rename = "bestshare")]
    pub best_share: i64,
    #[serde(rename = "SPS1m")]
    pub sps1m: f64,
    #[serde(rename = "SPS5m")]
    pub sps5m: f64,
    #[serde(rename = "SPS15m")]
    pub sps15m: f64,
    #[serde(rename = "SPS1h")]
    pub sps1h: f64,
}

impl PoolStats {
    /// Merge the three status lines field by field
    pub fn from_lines(l1: PoolStatusLine1, l2: PoolStatusLine2, l3: PoolStatusLine3) -> Self {
        Self {
            runtime: l1.runtime,
            last_update: l1.last_update,
            users: l1.users,
            workers: l1.workers,
            idle: l1.idle,
            disconnected: l1.disconnected,
            hashrate1m: l2.hashrate1m,
            hashrate5m: l2.hashrate5m,
            hashrate15m: l2.hashrate15m,
            hashrate1hr: l2.hashrate1hr,
            hashrate6hr: l2.hashrate6hr,
            hashrate1d: l2.hashrate1d,
            hashrate7d: l2.hashrate7d,
            diff: l3.diff,
            accepted: l3.accepted,
            rejected: l3.rejected,
            best_share: l3.best_share,
            sps1m: l3.sps1m,
            sps5m: l3.sps5m,
            sps15m: l3.sps15m,
            sps1h: l3.sps1h,
        }
    }
}

/// Per-user statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub hashrate1m: String,
    pub hashrate5m: String,
    pub hashrate1hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
    #[serde(rename = "lastshare")]
    pub last_share: i64,
    pub workers: i64,
    pub shares: i64,
    #[serde(rename = "bestshare")]
    pub best_share: f64,
    #[serde(rename = "bestever")]
    pub best_ever: i64,
    pub authorised: i64,
    /// Workers in the order ckpool lists them
    #[serde(rename = "worker")]
    pub workers_detail: Vec<Worker>,
}

/// A single connected mining device under a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    #[serde(rename = "workername")]
    pub worker_name: String,
    pub hashrate1m: String,
    pub hashrate5m: String,
    pub hashrate1hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
    #[serde(rename = "lastshare")]
    pub last_share: i64,
    pub shares: i64,
    #[serde(rename = "bestshare")]
    pub best_share: f64,
    #[serde(rename = "bestever")]
    pub best_ever: i64,
}
