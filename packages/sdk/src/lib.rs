#[cfg(feature = "schema")]
pub use cosmwasm_schema::{self, schemars};
pub use cosmwasm_std;
#[cfg(feature = "storage")]
pub use cw_storage_plus;

pub mod cosmwasm_ext;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
