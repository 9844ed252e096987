use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::blockchain::resolver::resolve_block;
use crate::error::{Error, Result};
use crate::models::ResolvedBlock;
use crate::rpc::NodeRpc;

// Delay between catch-up cycles once every confirmed height has been drained.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

// Consumer callbacks for the walker. `on_rollback` has a failing default
// body, so a handler that does not override it treats any reorg as fatal.
#[async_trait]
pub trait BlockHandler: Send {
    // Invoked exactly once per confirmed height, in increasing height order.
    async fn on_block(&mut self, height: u64, block: ResolvedBlock) -> Result<()>;

    // Invoked when the followed chain reorganized under an already delivered
    // block. Returns the height the walker should resume from; this is the
    // consumer's point to undo externally visible effects of past deliveries.
    async fn on_rollback(&mut self, resume_height: u64) -> Result<u64> {
        Err(Error::UnexpectedReorg(resume_height))
    }
}

// Identity of the last delivered block, kept to validate chain continuity.
#[derive(Debug, Clone)]
struct Tip {
    hash: String,
    prev_hash: Option<String>,
}

// Follows the canonical chain and delivers each block exactly once, after it
// is buried under the configured number of confirmations. Cursor and tip are
// owned by the single run loop; there is no internal parallelism.
pub struct ChainWalker<R, H> {
    rpc: R,
    handler: H,
    height: u64,
    confirmations: u64,
    poll_interval: Duration,
    tip: Option<Tip>,
}

impl<R: NodeRpc, H: BlockHandler> ChainWalker<R, H> {
    pub fn new(rpc: R, handler: H, start_height: u64, confirmations: u64) -> Self {
        ChainWalker {
            rpc,
            handler,
            height: start_height,
            confirmations,
            poll_interval: POLL_INTERVAL,
            tip: None,
        }
    }

    // Overrides the delay between catch-up cycles.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    // The next height the walker will attempt to process.
    pub fn cursor(&self) -> u64 {
        self.height
    }

    // Runs until an error propagates out. Nothing is retried here; the
    // caller owns restart policy and can resume from `cursor()`.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "following chain from height {} with {} confirmations",
            self.height, self.confirmations
        );
        loop {
            let mut target = self.rpc.best_height().await?;
            // A height is safe once the chain tip is at least
            // `confirmations` blocks above it.
            while self.height + self.confirmations <= target {
                let hash = self.rpc.block_hash(self.height).await?;
                let block = self.rpc.block(&hash).await?;

                if let Some(tip) = &self.tip {
                    if block.prev_hash.as_deref() != Some(tip.hash.as_str()) {
                        warn!(
                            "reorg at height {}: block {} declares parent {:?}, last delivered was {} (parent {:?})",
                            self.height, hash, block.prev_hash, tip.hash, tip.prev_hash
                        );
                        self.height = self.handler.on_rollback(self.height + 1).await?;
                        self.tip = None;
                        // The pre-reorg target describes the abandoned
                        // chain; fetch a fresh one before resuming.
                        target = self.rpc.best_height().await?;
                        continue;
                    }
                }

                let resolved = resolve_block(&self.rpc, block.tx).await?;
                debug!(
                    "delivering block {} with {} transactions",
                    self.height,
                    resolved.transactions.len()
                );
                self.handler.on_block(self.height, resolved).await?;
                self.tip = Some(Tip {
                    hash,
                    prev_hash: block.prev_hash,
                });
                self.height += 1;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
