use crate::blockchain::classifier::classify_output;
use crate::error::{Error, Result};
use crate::models::{ClassifiedInput, ClassifiedOutput, ResolvedBlock, ResolvedTx};
use crate::rpc::{DecodedTx, NodeRpc, TxIn};

// Resolves every transaction of one confirmed block. Ids are sorted first so
// the processing order is deterministic regardless of the node-reported
// order. Any unrecognized output kind aborts the whole resolution.
pub async fn resolve_block<R: NodeRpc>(rpc: &R, mut txids: Vec<String>) -> Result<ResolvedBlock> {
    txids.sort();
    let mut transactions = Vec::with_capacity(txids.len());
    for txid in &txids {
        transactions.push(resolve_tx(rpc, txid).await?);
    }
    Ok(ResolvedBlock { transactions })
}

async fn resolve_tx<R: NodeRpc>(rpc: &R, txid: &str) -> Result<ResolvedTx> {
    let tx = fetch_decoded(rpc, txid).await?;

    let mut inputs = Vec::with_capacity(tx.vin.len());
    for vin in &tx.vin {
        inputs.push(resolve_input(rpc, txid, vin).await?);
    }

    let mut outputs = Vec::with_capacity(tx.vout.len());
    for vout in &tx.vout {
        outputs.push(ClassifiedOutput {
            txid: txid.to_string(),
            class: classify_output(vout)?,
        });
    }

    Ok(ResolvedTx { inputs, outputs })
}

// Coinbase inputs mint new value and resolve without any lookup. Everything
// else is re-derived by fetching the transaction it spends and classifying
// the referenced output.
async fn resolve_input<R: NodeRpc>(
    rpc: &R,
    spending_txid: &str,
    vin: &TxIn,
) -> Result<ClassifiedInput> {
    match vin {
        TxIn::Coinbase { .. } => Ok(ClassifiedInput::Coinbase),
        TxIn::Spend { txid, vout } => {
            let origin_tx = fetch_decoded(rpc, txid).await?;
            let origin_out = origin_tx.vout.get(*vout as usize).ok_or_else(|| {
                Error::BadResponse(format!("transaction {txid} has no output {vout}"))
            })?;
            Ok(ClassifiedInput::Resolved {
                spending_txid: spending_txid.to_string(),
                origin: ClassifiedOutput {
                    txid: txid.clone(),
                    class: classify_output(origin_out)?,
                },
            })
        }
    }
}

async fn fetch_decoded<R: NodeRpc>(rpc: &R, txid: &str) -> Result<DecodedTx> {
    let raw = rpc.raw_transaction(txid).await?;
    rpc.decode_raw_transaction(&raw).await
}
