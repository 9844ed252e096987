use crate::error::{Error, Result};
use crate::models::{OutputClass, ValueKind};
use crate::rpc::TxOut;

// Classifies one decoded output descriptor. Pure, no I/O; the originating
// txid is attached by the resolver afterwards.
pub fn classify_output(out: &TxOut) -> Result<OutputClass> {
    match out.script_pub_key.kind.as_str() {
        "nulldata" => Ok(OutputClass::Data {
            payload: out.script_pub_key.hex.clone(),
        }),
        kind @ ("pubkeyhash" | "pubkey" | "scripthash") => {
            // These kinds carry exactly one address.
            let address = out
                .script_pub_key
                .addresses
                .first()
                .cloned()
                .ok_or(Error::MissingAddress(out.n))?;
            Ok(OutputClass::Value {
                kind: match kind {
                    "pubkeyhash" => ValueKind::PubKeyHash,
                    "pubkey" => ValueKind::PubKey,
                    _ => ValueKind::ScriptHash,
                },
                amount: out.value,
                index: out.n,
                address,
            })
        }
        other => Err(Error::UnsupportedOutputKind(other.to_string())),
    }
}
