//! CubeHash16/32-512

use super::{read_u32_le, Digest512};

const ROUNDS_PER_BLOCK: usize = 16;
const BLOCK_BYTES: usize = 32;
const SETUP_ROUNDS: usize = 10 * ROUNDS_PER_BLOCK;

fn round(x: &mut [u32; 32]) {
    for (rot, sw0, sw1) in [(7u32, 8usize, 2usize), (11, 4, 1)] {
        for i in 0..16 {
            x[16 + i] = x[16 + i].wrapping_add(x[i]);
        }
        for word in x[..16].iter_mut() {
            *word = word.rotate_left(rot);
        }
        for i in 0..16 {
            if i & sw0 == 0 {
                x.swap(i, i | sw0);
            }
        }
        for i in 0..16 {
            x[i] ^= x[16 + i];
        }
        for i in 16..32 {
            if i & sw1 == 0 {
                x.swap(i, i | sw1);
            }
        }
    }
}

fn rounds(x: &mut [u32; 32], n: usize) {
    for _ in 0..n {
        round(x);
    }
}

pub fn cubehash512(data: &[u8]) -> Digest512 {
    let mut x = [0u32; 32];
    x[0] = 64;
    x[1] = BLOCK_BYTES as u32;
    x[2] = ROUNDS_PER_BLOCK as u32;
    rounds(&mut x, SETUP_ROUNDS);

    let mut padded = data.to_vec();
    padded.push(0x80);
    padded.resize(padded.len().div_ceil(BLOCK_BYTES) * BLOCK_BYTES, 0);

    for block in padded.chunks_exact(BLOCK_BYTES) {
        for (k, word) in x[..8].iter_mut().enumerate() {
            *word ^= read_u32_le(&block[4 * k..]);
        }
        rounds(&mut x, ROUNDS_PER_BLOCK);
    }

    x[31] ^= 1;
    rounds(&mut x, SETUP_ROUNDS);

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(4).zip(x.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
