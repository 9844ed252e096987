pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod rpc;

pub use blockchain::{classify_output, resolve_block, BlockHandler, ChainWalker};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    ClassifiedInput, ClassifiedOutput, OutputClass, ResolvedBlock, ResolvedTx, ValueKind,
};
pub use rpc::NodeRpc;
