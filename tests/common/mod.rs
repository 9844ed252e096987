#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chainfold::rpc::{Block, DecodedTx, NodeRpc, ScriptPubKey, TxIn, TxOut};
use chainfold::{BlockHandler, Error, ResolvedBlock, Result};

// In-memory stand-in for a node: one canonical block per height plus a
// transaction store. `raw_fetches` records every getrawtransaction call.
#[derive(Default)]
pub struct MockChain {
    pub best: u64,
    pub blocks: HashMap<u64, Block>,
    pub txs: HashMap<String, DecodedTx>,
    pub raw_fetches: Vec<String>,
}

impl MockChain {
    pub fn add_block(&mut self, height: u64, hash: &str, prev: Option<&str>, txids: &[&str]) {
        self.blocks.insert(
            height,
            Block {
                hash: hash.to_string(),
                prev_hash: prev.map(str::to_string),
                tx: txids.iter().map(|t| t.to_string()).collect(),
            },
        );
        if height > self.best {
            self.best = height;
        }
    }

    pub fn add_tx(&mut self, txid: &str, tx: DecodedTx) {
        self.txs.insert(txid.to_string(), tx);
    }
}

#[derive(Clone, Default)]
pub struct MockNode(pub Arc<Mutex<MockChain>>);

impl MockNode {
    pub fn chain(&self) -> MutexGuard<'_, MockChain> {
        self.0.lock().unwrap()
    }
}

#[async_trait]
impl NodeRpc for MockNode {
    async fn best_height(&self) -> Result<u64> {
        Ok(self.chain().best)
    }

    async fn block_hash(&self, height: u64) -> Result<String> {
        self.chain()
            .blocks
            .get(&height)
            .map(|b| b.hash.clone())
            .ok_or_else(|| Error::BadResponse(format!("no block at height {height}")))
    }

    async fn block(&self, hash: &str) -> Result<Block> {
        self.chain()
            .blocks
            .values()
            .find(|b| b.hash == hash)
            .cloned()
            .ok_or_else(|| Error::BadResponse(format!("unknown block {hash}")))
    }

    async fn raw_transaction(&self, txid: &str) -> Result<String> {
        let mut chain = self.chain();
        chain.raw_fetches.push(txid.to_string());
        if chain.txs.contains_key(txid) {
            Ok(format!("raw:{txid}"))
        } else {
            Err(Error::BadResponse(format!("unknown transaction {txid}")))
        }
    }

    async fn decode_raw_transaction(&self, raw: &str) -> Result<DecodedTx> {
        let txid = raw
            .strip_prefix("raw:")
            .ok_or_else(|| Error::BadResponse(format!("undecodable transaction `{raw}`")))?;
        self.chain()
            .txs
            .get(txid)
            .cloned()
            .ok_or_else(|| Error::BadResponse(format!("unknown transaction {txid}")))
    }
}

// Seeds a linear run of blocks `{prefix}{from}..={prefix}{to}`, the first
// one linking to `parent`, each carrying a single coinbase transaction.
pub fn seed_chain(node: &MockNode, prefix: &str, from: u64, to: u64, parent: Option<&str>) {
    let mut chain = node.chain();
    let mut prev = parent.map(str::to_string);
    for height in from..=to {
        let hash = format!("{prefix}{height}");
        let txid = format!("{prefix}cb{height}");
        chain.add_tx(
            &txid,
            coinbase_tx(vec![value_out(0, 50.0, "pubkeyhash", "DMinerPayout")]),
        );
        chain.add_block(height, &hash, prev.as_deref(), &[txid.as_str()]);
        prev = Some(hash);
    }
}

pub fn value_out(n: u32, value: f64, kind: &str, address: &str) -> TxOut {
    TxOut {
        value,
        n,
        script_pub_key: ScriptPubKey {
            kind: kind.to_string(),
            hex: String::new(),
            addresses: vec![address.to_string()],
        },
    }
}

pub fn data_out(n: u32, payload: &str) -> TxOut {
    TxOut {
        value: 0.0,
        n,
        script_pub_key: ScriptPubKey {
            kind: "nulldata".to_string(),
            hex: payload.to_string(),
            addresses: Vec::new(),
        },
    }
}

// An output of the given kind with no address attached.
pub fn bare_out(n: u32, value: f64, kind: &str) -> TxOut {
    TxOut {
        value,
        n,
        script_pub_key: ScriptPubKey {
            kind: kind.to_string(),
            hex: String::new(),
            addresses: Vec::new(),
        },
    }
}

pub fn coinbase_tx(vout: Vec<TxOut>) -> DecodedTx {
    DecodedTx {
        vin: vec![TxIn::Coinbase {
            coinbase: "04ffff001d0104".to_string(),
        }],
        vout,
    }
}

pub fn spend_tx(spends: &[(&str, u32)], vout: Vec<TxOut>) -> DecodedTx {
    DecodedTx {
        vin: spends
            .iter()
            .map(|(txid, vout)| TxIn::Spend {
                txid: txid.to_string(),
                vout: *vout,
            })
            .collect(),
        vout,
    }
}

// Records deliveries; optionally stops the run loop by failing from the
// callback once a fixed number of blocks has been recorded. Keeps the
// default (fatal) rollback behavior.
#[derive(Default)]
pub struct Recorder {
    pub blocks: Arc<Mutex<Vec<(u64, ResolvedBlock)>>>,
    pub stop_after: Option<usize>,
}

// Delivered heights, from a clone of a recorder's block list.
pub fn heights(blocks: &Arc<Mutex<Vec<(u64, ResolvedBlock)>>>) -> Vec<u64> {
    blocks.lock().unwrap().iter().map(|(h, _)| *h).collect()
}

#[async_trait]
impl BlockHandler for Recorder {
    async fn on_block(&mut self, height: u64, block: ResolvedBlock) -> Result<()> {
        let mut blocks = self.blocks.lock().unwrap();
        blocks.push((height, block));
        if Some(blocks.len()) == self.stop_after {
            return Err(Error::callback("enough blocks recorded"));
        }
        Ok(())
    }
}
