use async_trait::async_trait;
use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use log::{debug, error, info};

use chainfold::rpc::Client;
use chainfold::{BlockHandler, ChainWalker, Config, Error, ResolvedBlock, Result};

// Logs every confirmed block. Reorgs keep the fatal default: this wrapper
// has no external effects to undo, so an unexpected reorg stops the process.
struct LogBlocks;

#[async_trait]
impl BlockHandler for LogBlocks {
    async fn on_block(&mut self, height: u64, block: ResolvedBlock) -> Result<()> {
        info!(
            "block {} confirmed with {} transactions",
            height,
            block.transactions.len()
        );
        debug!(
            "block {}: {}",
            height,
            serde_json::to_string(&block).unwrap_or_default()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let rpc = Client::new(
        &config.rpc_url,
        config.rpc_user.clone(),
        config.rpc_password.clone(),
    )?;
    let mut walker = ChainWalker::new(rpc, LogBlocks, config.start_height, config.confirmations)
        .poll_interval(config.poll_interval);

    // Transport hiccups restart the walker from its current cursor after an
    // exponential backoff. Anything else means an inconsistent view of the
    // chain and stops the process.
    let mut policy = ExponentialBackoff {
        max_elapsed_time: None,
        ..Default::default()
    };
    loop {
        let before = walker.cursor();
        match walker.run().await {
            Err(e @ Error::Transport(_)) => {
                if walker.cursor() > before {
                    policy.reset();
                }
                let delay = policy.next_backoff().unwrap_or_default();
                error!(
                    "{}. Restarting from height {} in {:.1}s",
                    e,
                    walker.cursor(),
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!("chain walker stopped: {}", e);
                return Err(e);
            }
            Ok(()) => return Ok(()),
        }
    }
}
