use serde::Serialize;

// Spendable script kinds the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    PubKeyHash,
    PubKey,
    ScriptHash,
}

// Classification of one transaction output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputClass {
    // Unspendable data carrier; the payload is the raw script hex.
    #[serde(rename = "nulldata")]
    Data { payload: String },
    // Standard spendable output with a single owning address.
    Value {
        kind: ValueKind,
        amount: f64,
        index: u32,
        address: String,
    },
}

// A classified output tagged with the id of the transaction that created it.
// The tag is attached after classification; the classifier itself is pure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedOutput {
    pub txid: String,
    #[serde(flatten)]
    pub class: OutputClass,
}

// A classified input: minted by the block, or spending a prior output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifiedInput {
    Coinbase,
    // `origin` is the consumed output, tagged with the transaction that
    // created it; `spending_txid` is the transaction consuming it here.
    Resolved {
        spending_txid: String,
        origin: ClassifiedOutput,
    },
}

// One fully resolved transaction, inputs and outputs in original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTx {
    pub inputs: Vec<ClassifiedInput>,
    pub outputs: Vec<ClassifiedOutput>,
}

// Every resolved transaction of one confirmed block, in sorted txid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBlock {
    pub transactions: Vec<ResolvedTx>,
}
