//! Test fixtures for the dashboard tests
//!
//! Status file contents, known-good addresses, a ckpool log directory on disk
//! and a stats provider double that counts its calls.

use crate::{
    application::services::{StatsError, StatsProvider},
    domain::{ParseError, PoolStats, UserStats, Worker},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canonical mainnet P2WPKH address
pub const VALID_ADDRESS: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

/// Canonical mainnet P2PKH address
pub const VALID_LEGACY_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

/// Testnet address, rejected on mainnet
pub const TESTNET_ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";

/// A pool status file as ckpool writes it
pub const POOL_STATUS: &str = concat!(
    r#"{"runtime":100,"lastupdate":200,"Users":5,"Workers":12,"Idle":0,"Disconnected":1}"#,
    "\n",
    r#"{"hashrate1m":"10G","hashrate5m":"9G","hashrate15m":"9G","hashrate1hr":"9G","hashrate6hr":"8G","hashrate1d":"8G","hashrate7d":"7G"}"#,
    "\n",
    r#"{"diff":1024.5,"accepted":99,"rejected":1,"bestshare":5000,"SPS1m":1.1,"SPS5m":1.0,"SPS15m":0.9,"SPS1h":0.8}"#,
    "\n"
);

/// A user status file with two workers
pub const USER_STATUS: &str = r#"{
    "hashrate1m": "5T", "hashrate5m": "4.8T", "hashrate1hr": "4.5T",
    "hashrate1d": "4.2T", "hashrate7d": "4T",
    "lastshare": 1700000000, "workers": 2, "shares": 1200,
    "bestshare": 12345.6, "bestever": 99999, "authorised": 1690000000,
    "worker": [
        {"workername": "rig1", "hashrate1m": "3T", "shares": 700, "bestshare": 12345.6},
        {"workername": "rig2", "hashrate1m": "2T", "shares": 500, "bestshare": 800.0}
    ]
}"#;

/// A temporary ckpool log directory
pub struct StatsDir {
    dir: tempfile::TempDir,
}

impl StatsDir {
    /// Create an empty log directory
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `pool/pool.status`
    pub fn write_pool_status(&self, contents: &str) -> PathBuf {
        let pool_dir = self.dir.path().join("pool");
        std::fs::create_dir_all(&pool_dir).expect("failed to create pool dir");
        let path = pool_dir.join("pool.status");
        std::fs::write(&path, contents).expect("failed to write pool status");
        path
    }

    /// Write `users/<address>`
    pub fn write_user_status(&self, address: &str, contents: &str) -> PathBuf {
        let users_dir = self.dir.path().join("users");
        std::fs::create_dir_all(&users_dir).expect("failed to create users dir");
        let path = users_dir.join(address);
        std::fs::write(&path, contents).expect("failed to write user status");
        path
    }
}

/// Stats provider double returning fixed values and counting calls
pub struct StaticStatsProvider {
    pool: Option<PoolStats>,
    user: Option<UserStats>,
    pool_calls: AtomicUsize,
    user_calls: AtomicUsize,
}

impl StaticStatsProvider {
    /// Provider that succeeds with sample statistics
    pub fn new() -> Self {
        Self {
            pool: Some(sample_pool_stats()),
            user: Some(sample_user_stats()),
            pool_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails to parse
    pub fn failing() -> Self {
        Self {
            pool: None,
            user: None,
            pool_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    pub fn pool_calls(&self) -> usize {
        self.pool_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    fn parse_failure() -> StatsError {
        StatsError::Parse {
            path: PathBuf::from("/test/pool/pool.status"),
            source: ParseError::TooFewLines { found: 1 },
        }
    }
}

#[async_trait]
impl StatsProvider for StaticStatsProvider {
    async fn pool_stats(&self) -> Result<PoolStats, StatsError> {
        self.pool_calls.fetch_add(1, Ordering::SeqCst);
        self.pool.clone().ok_or_else(Self::parse_failure)
    }

    async fn user_stats(&self, _username: &str) -> Result<UserStats, StatsError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user.clone().ok_or_else(Self::parse_failure)
    }
}

/// Pool statistics matching [`POOL_STATUS`]
pub fn sample_pool_stats() -> PoolStats {
    PoolStats {
        runtime: 100,
        last_update: 200,
        users: 5,
        workers: 12,
        idle: 0,
        disconnected: 1,
        hashrate1m: "10G".to_string(),
        hashrate5m: "9G".to_string(),
        hashrate15m: "9G".to_string(),
        hashrate1hr: "9G".to_string(),
        hashrate6hr: "8G".to_string(),
        hashrate1d: "8G".to_string(),
        hashrate7d: "7G".to_string(),
        diff: 1024.5,
        accepted: 99,
        rejected: 1,
        best_share: 5000,
        sps1m: 1.1,
        sps5m: 1.0,
        sps15m: 0.9,
        sps1h: 0.8,
    }
}

/// User statistics with a single worker
pub fn sample_user_stats() -> UserStats {
    UserStats {
        hashrate1m: "5T".to_string(),
        workers: 1,
        shares: 10,
        workers_detail: vec![Worker {
            worker_name: format!("{}.rig1", VALID_ADDRESS),
            hashrate1m: "5T".to_string(),
            shares: 10,
            ..Default::default()
        }],
        ..Default::default()
    }
}
