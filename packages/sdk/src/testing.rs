use cosmwasm_std::{BlockInfo, Timestamp};

pub const CHAIN_ID: &str = "csdt-testing";

/// A block at `height` whose time is `seconds` past the Unix epoch
pub fn block(height: u64, seconds: u64) -> BlockInfo {
    block_at(height, Timestamp::from_seconds(seconds))
}

pub fn block_at(height: u64, time: Timestamp) -> BlockInfo {
    BlockInfo {
        height,
        time,
        chain_id: CHAIN_ID.into(),
    }
}
