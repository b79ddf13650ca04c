//! Skein-512-512 over Threefish-512

use super::{read_u64_le, Digest512};

const ROTATIONS: [[u32; 4]; 8] = [
    [46, 36, 19, 37],
    [33, 27, 14, 42],
    [17, 49, 36, 39],
    [44, 9, 54, 56],
    [39, 30, 34, 24],
    [13, 50, 10, 17],
    [25, 29, 39, 43],
    [8, 35, 56, 22],
];

const PERMUTE: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];
const KEY_PARITY: u64 = 0x1BD11BDAA9FC1A22;
const BLOCK_BYTES: usize = 64;

const TYPE_CONFIG: u64 = 4;
const TYPE_MESSAGE: u64 = 48;
const TYPE_OUTPUT: u64 = 63;

fn threefish(key: &[u64; 8], tweak: [u64; 2], block: &[u64; 8]) -> [u64; 8] {
    let mut k = [0u64; 9];
    k[..8].copy_from_slice(key);
    k[8] = key.iter().fold(KEY_PARITY, |acc, w| acc ^ w);
    let t = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];

    let mut v = *block;
    let inject = |v: &mut [u64; 8], s: usize| {
        for (i, word) in v.iter_mut().enumerate() {
            *word = word.wrapping_add(k[(s + i) % 9]);
        }
        v[5] = v[5].wrapping_add(t[s % 3]);
        v[6] = v[6].wrapping_add(t[(s + 1) % 3]);
        v[7] = v[7].wrapping_add(s as u64);
    };

    for d in 0..72 {
        if d % 4 == 0 {
            inject(&mut v, d / 4);
        }
        let r = ROTATIONS[d % 8];
        for j in 0..4 {
            let a = v[2 * j].wrapping_add(v[2 * j + 1]);
            v[2 * j + 1] = v[2 * j + 1].rotate_left(r[j]) ^ a;
            v[2 * j] = a;
        }
        let mixed = v;
        for (i, word) in v.iter_mut().enumerate() {
            *word = mixed[PERMUTE[i]];
        }
    }
    inject(&mut v, 18);
    v
}

/// Unique block iteration chaining `message` into `g`
fn ubi(mut g: [u64; 8], message: &[u8], kind: u64) -> [u64; 8] {
    let len = message.len();
    let blocks = len.div_ceil(BLOCK_BYTES).max(1);

    let mut padded = message.to_vec();
    padded.resize(blocks * BLOCK_BYTES, 0);

    for (i, chunk) in padded.chunks_exact(BLOCK_BYTES).enumerate() {
        let position = len.min((i + 1) * BLOCK_BYTES) as u64;
        let mut t1 = kind << 56;
        if i == 0 {
            t1 |= 1 << 62;
        }
        if i == blocks - 1 {
            t1 |= 1 << 63;
        }

        let mut w = [0u64; 8];
        for (k, word) in w.iter_mut().enumerate() {
            *word = read_u64_le(&chunk[8 * k..]);
        }
        let e = threefish(&g, [position, t1], &w);
        for k in 0..8 {
            g[k] = e[k] ^ w[k];
        }
    }
    g
}

pub fn skein512(data: &[u8]) -> Digest512 {
    let mut config = Vec::with_capacity(32);
    config.extend_from_slice(&0x3341_4853u32.to_le_bytes());
    config.extend_from_slice(&1u16.to_le_bytes());
    config.extend_from_slice(&0u16.to_le_bytes());
    config.extend_from_slice(&512u64.to_le_bytes());
    config.resize(32, 0);

    let g = ubi([0u64; 8], &config, TYPE_CONFIG);
    let g = ubi(g, data, TYPE_MESSAGE);
    let g = ubi(g, &0u64.to_le_bytes(), TYPE_OUTPUT);

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(8).zip(g.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
