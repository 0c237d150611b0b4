//! Domain layer - Statistics models, status file parsing and address rules
//!
//! Nothing in here touches the filesystem or HTTP; callers hand in bytes and
//! strings and get typed values back.

pub mod address;
pub mod parser;
pub mod stats;

pub use address::is_valid_address;
pub use parser::{parse_pool_status, parse_user_status, ParseError};
pub use stats::{PoolStats, PoolStatusLine1, PoolStatusLine2, PoolStatusLine3, UserStats, Worker};
