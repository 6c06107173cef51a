pub mod contract;
pub mod error;
pub mod msg;
pub mod phase;
pub mod state;
