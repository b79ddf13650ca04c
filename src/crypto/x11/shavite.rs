//! SHAvite-3-512

use super::aes::aes_round_words;
use super::{block_counter, read_u32_le, Digest512};

const BLOCK_BYTES: usize = 128;
const ROUND_KEYS: usize = 448;
const ROUNDS: usize = 14;

const IV: [u32; 16] = [
    0x72FCCDD8, 0x79CA4727, 0x128A077B, 0x40D55AEC, 0xD1901A06, 0x430AE307, 0xB29F5CD1, 0xDF07FBFC,
    0x8E45D73D, 0x681AB538, 0xBDE86578, 0xDD577E47, 0xE275EADE, 0x502D9FCD, 0xB9357178, 0x022A4B9A,
];

type Quad = [u32; 4];

fn xor(a: Quad, b: &[u32]) -> Quad {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

/// Counter words mixed into the key schedule at fixed offsets
fn counter_injection(u: usize, c: &Quad) -> Option<Quad> {
    match u {
        32 => Some([c[0], c[1], c[2], !c[3]]),
        164 => Some([c[3], c[2], c[1], !c[0]]),
        316 => Some([c[2], c[3], c[0], !c[1]]),
        440 => Some([c[1], c[0], c[3], !c[2]]),
        _ => None,
    }
}

fn key_schedule(block: &[u8], counter: u128) -> [u32; ROUND_KEYS] {
    let c = [counter as u32, (counter >> 32) as u32, (counter >> 64) as u32, (counter >> 96) as u32];

    let mut rk = [0u32; ROUND_KEYS];
    for (k, word) in rk[..32].iter_mut().enumerate() {
        *word = read_u32_le(&block[4 * k..]);
    }

    let mut u = 32;
    loop {
        for _ in 0..8 {
            let x = aes_round_words([rk[u - 31], rk[u - 30], rk[u - 29], rk[u - 32]]);
            for k in 0..4 {
                rk[u + k] = x[k] ^ rk[u - 4 + k];
            }
            if let Some(inject) = counter_injection(u, &c) {
                for k in 0..4 {
                    rk[u + k] ^= inject[k];
                }
            }
            u += 4;
        }
        if u == ROUND_KEYS {
            break;
        }
        for _ in 0..8 {
            for k in 0..4 {
                rk[u + k] = rk[u - 32 + k] ^ rk[u - 7 + k];
            }
            u += 4;
        }
    }
    rk
}

fn compress(h: &mut [u32; 16], block: &[u8], counter: u128) {
    let rk = key_schedule(block, counter);
    let mut next_key = 0;
    let mut f = |x: Quad| -> Quad {
        let mut x = xor(x, &rk[next_key..]);
        next_key += 4;
        for _ in 0..3 {
            x = xor(aes_round_words(x), &rk[next_key..]);
            next_key += 4;
        }
        aes_round_words(x)
    };

    let mut p: [Quad; 4] = [[0; 4]; 4];
    for (quad, chunk) in p.iter_mut().zip(h.chunks_exact(4)) {
        quad.copy_from_slice(chunk);
    }
    for _ in 0..ROUNDS {
        let f1 = f(p[1]);
        p[0] = xor(p[0], &f1);
        let f3 = f(p[3]);
        p[2] = xor(p[2], &f3);
        p = [p[3], p[0], p[1], p[2]];
    }

    for (i, word) in h.iter_mut().enumerate() {
        *word ^= p[i / 4][i % 4];
    }
}

pub fn shavite512(data: &[u8]) -> Digest512 {
    let bit_len = data.len() as u128 * 8;

    let mut padded = data.to_vec();
    padded.push(0x80);
    while padded.len() % BLOCK_BYTES != 110 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_le_bytes());
    padded.extend_from_slice(&512u16.to_le_bytes());

    let mut h = IV;
    for (i, block) in padded.chunks_exact(BLOCK_BYTES).enumerate() {
        let counter = block_counter(i as u128 * 1024, 1024, bit_len);
        compress(&mut h, block, counter);
    }

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(4).zip(h.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
