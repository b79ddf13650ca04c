//! Timestamped transaction structure and wire serialization
//!
//! Proof-of-stake transactions carry their own `time` field right after the
//! version. Only what the genesis coinbase needs is modelled here.

use serde::Serialize;
use crate::crypto::{sha256d, Hash};

/// Script opcodes used by coinbase scripts
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
}

/// Raw script bytes with a push-only builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script(#[serde(with = "hex_bytes")] pub Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Push an integer, using the small-integer opcodes where they exist
    pub fn push_int(mut self, value: i64) -> Self {
        match value {
            0 => self.0.push(opcodes::OP_0),
            -1 => self.0.push(opcodes::OP_1NEGATE),
            1..=16 => self.0.push(opcodes::OP_1 + (value as u8 - 1)),
            _ => return self.push_slice(&script_num(value)),
        }
        self
    }

    /// Push raw data with the shortest push opcode
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < opcodes::OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(opcodes::OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(opcodes::OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(opcodes::OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Minimal little-endian sign-magnitude encoding
fn script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut out = Vec::new();
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }
}

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs
    pub const fn null() -> Self {
        Self {
            hash: Hash::zero(),
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    /// Amount in base units
    pub value: i64,
    pub script_pubkey: Script,
}

impl TxOut {
    /// An empty output: no value and no script
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    /// Transaction timestamp (seconds since Unix epoch)
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction carrying `script_sig` and one empty output
    pub fn coinbase(time: u32, script_sig: Script) -> Self {
        Self {
            version: 1,
            time,
            inputs: vec![TxIn {
                prevout: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut::empty()],
            lock_time: 0,
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Calculate transaction hash
    pub fn hash(&self) -> Hash {
        sha256d(&self.to_bytes())
    }

    /// Serialize in network format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.time.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(&input.prevout.hash.0);
            bytes.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_var_bytes(&mut bytes, input.script_sig.as_bytes());
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            write_var_bytes(&mut bytes, output.script_pubkey.as_bytes());
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());

        bytes
    }
}

/// Append a CompactSize length prefix
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

fn write_var_bytes(out: &mut Vec<u8>, data: &[u8]) {
    write_compact_size(out, data.len() as u64);
    out.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_int_small_values() {
        assert_eq!(Script::new().push_int(0).0, vec![0x00]);
        assert_eq!(Script::new().push_int(1).0, vec![0x51]);
        assert_eq!(Script::new().push_int(16).0, vec![0x60]);
        assert_eq!(Script::new().push_int(-1).0, vec![0x4f]);
    }

    #[test]
    fn test_push_int_encodes_script_num() {
        assert_eq!(Script::new().push_int(42).0, vec![0x01, 0x2a]);
        assert_eq!(Script::new().push_int(128).0, vec![0x02, 0x80, 0x00]);
        assert_eq!(Script::new().push_int(-128).0, vec![0x02, 0x80, 0x80]);
        assert_eq!(Script::new().push_int(-5).0, vec![0x01, 0x85]);
    }

    #[test]
    fn test_push_slice_uses_pushdata_for_long_data() {
        let short = Script::new().push_slice(&[7u8; 75]);
        assert_eq!(short.0[0], 75);
        assert_eq!(short.0.len(), 76);

        let long = Script::new().push_slice(&[7u8; 76]);
        assert_eq!(&long.0[..2], &[opcodes::OP_PUSHDATA1, 76]);

        let longer = Script::new().push_slice(&[7u8; 300]);
        assert_eq!(&longer.0[..3], &[opcodes::OP_PUSHDATA2, 0x2c, 0x01]);
    }

    #[test]
    fn test_compact_size_boundaries() {
        let mut out = Vec::new();
        write_compact_size(&mut out, 0xfc);
        assert_eq!(out, vec![0xfc]);

        out.clear();
        write_compact_size(&mut out, 0xfd);
        assert_eq!(out, vec![0xfd, 0xfd, 0x00]);

        out.clear();
        write_compact_size(&mut out, 0x1_0000);
        assert_eq!(out, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_coinbase_shape() {
        let tx = Transaction::coinbase(1_429_801_140, Script::new().push_int(0));
        assert!(tx.is_coinbase());
        assert_eq!(tx.outputs.len(), 1);
        assert!(tx.outputs[0].is_empty());
    }

    #[test]
    fn test_serialization_layout() {
        let tx = Transaction::coinbase(7, Script::new());
        let bytes = tx.to_bytes();
        // version + time + vin count + outpoint + script len + sequence
        // + vout count + value + script len + lock time
        assert_eq!(bytes.len(), 4 + 4 + 1 + 36 + 1 + 4 + 1 + 8 + 1 + 4);
        assert_eq!(&bytes[4..8], &7u32.to_le_bytes());
    }
}
