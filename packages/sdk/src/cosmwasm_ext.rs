pub use cosmwasm_std::{CosmosMsg, Empty as CustomMsg, SubMsg};

pub type Response = cosmwasm_std::Response<CustomMsg>;
