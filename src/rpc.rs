use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

// A block as reported by the node: its identity, the parent link used for
// continuity checks, and the ordered transaction id list.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub hash: String,
    #[serde(rename = "previousblockhash")]
    pub prev_hash: Option<String>,
    pub tx: Vec<String>,
}

// One decoded transaction: ordered inputs and outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct DecodedTx {
    pub vin: Vec<TxIn>,
    pub vout: Vec<TxOut>,
}

// Transaction input descriptor: either the coinbase marker or a reference
// to the output it spends.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TxIn {
    Coinbase { coinbase: String },
    Spend { txid: String, vout: u32 },
}

// Transaction output descriptor as decoded by the node.
#[derive(Debug, Clone, Deserialize)]
pub struct TxOut {
    pub value: f64,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPubKey {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub addresses: Vec<String>,
}

// The node capability set the engine consumes. Implemented below for a real
// JSON-RPC endpoint and by in-memory fakes in the test suite.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    // Height of the node's current best block.
    async fn best_height(&self) -> Result<u64>;

    // Hash of the canonical block at the given height.
    async fn block_hash(&self, height: u64) -> Result<String>;

    // Full block contents for the given hash.
    async fn block(&self, hash: &str) -> Result<Block>;

    // Raw transaction, hex encoded.
    async fn raw_transaction(&self, txid: &str) -> Result<String>;

    // Decoded form of a raw transaction.
    async fn decode_raw_transaction(&self, raw: &str) -> Result<DecodedTx>;
}

// JSON-RPC client for a Bitcoin-family node over HTTP.
pub struct Client(jsonrpc::Client);

impl Client {
    pub fn new(url: &str, user: Option<String>, pass: Option<String>) -> Result<Self> {
        let client = jsonrpc::Client::simple_http(url, user, pass).map_err(jsonrpc::Error::from)?;
        info!("connected to node rpc at {}", url);
        Ok(Client(client))
    }

    fn call<T: for<'de> Deserialize<'de>>(&self, method: &str, params: &[Value]) -> Result<T> {
        let raw = serde_json::value::to_raw_value(params).map_err(jsonrpc::Error::from)?;
        let request = self.0.build_request(method, Some(&*raw));
        let response = self.0.send_request(request)?;
        Ok(response.result()?)
    }
}

#[async_trait]
impl NodeRpc for Client {
    async fn best_height(&self) -> Result<u64> {
        self.call("getblockcount", &[])
    }

    async fn block_hash(&self, height: u64) -> Result<String> {
        self.call("getblockhash", &[height.into()])
    }

    async fn block(&self, hash: &str) -> Result<Block> {
        self.call("getblock", &[hash.into()])
    }

    async fn raw_transaction(&self, txid: &str) -> Result<String> {
        self.call("getrawtransaction", &[txid.into()])
    }

    async fn decode_raw_transaction(&self, raw: &str) -> Result<DecodedTx> {
        self.call("decoderawtransaction", &[raw.into()])
    }
}
