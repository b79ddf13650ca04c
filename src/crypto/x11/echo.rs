//! ECHO-512: AES rounds over a 4x4 grid of 128-bit words

use super::aes::{aes_round, mix_column};
use super::{block_counter, Digest512};

const BLOCK_BYTES: usize = 128;
const ROUNDS: usize = 10;

type Word = [u8; 16];

fn big_round(w: &mut [Word; 16], counter: &mut u128) {
    for word in w.iter_mut() {
        let keyed = aes_round(word, &counter.to_le_bytes());
        *word = aes_round(&keyed, &[0u8; 16]);
        *counter = counter.wrapping_add(1);
    }

    let mut shifted = [[0u8; 16]; 16];
    for c in 0..4 {
        for r in 0..4 {
            shifted[4 * c + r] = w[4 * ((c + r) % 4) + r];
        }
    }

    for c in 0..4 {
        for b in 0..16 {
            let column = mix_column([
                shifted[4 * c][b],
                shifted[4 * c + 1][b],
                shifted[4 * c + 2][b],
                shifted[4 * c + 3][b],
            ]);
            for r in 0..4 {
                w[4 * c + r][b] = column[r];
            }
        }
    }
}

fn compress(v: &mut [Word; 8], block: &[u8], mut counter: u128) {
    let mut m = [[0u8; 16]; 8];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(16)) {
        word.copy_from_slice(chunk);
    }

    let mut w = [[0u8; 16]; 16];
    w[..8].copy_from_slice(v);
    w[8..].copy_from_slice(&m);
    for _ in 0..ROUNDS {
        big_round(&mut w, &mut counter);
    }

    for i in 0..8 {
        for b in 0..16 {
            v[i][b] ^= m[i][b] ^ w[i][b] ^ w[i + 8][b];
        }
    }
}

pub fn echo512(data: &[u8]) -> Digest512 {
    let bit_len = data.len() as u128 * 8;

    let mut padded = data.to_vec();
    padded.push(0x80);
    while padded.len() % BLOCK_BYTES != 110 {
        padded.push(0);
    }
    padded.extend_from_slice(&512u16.to_le_bytes());
    padded.extend_from_slice(&bit_len.to_le_bytes());

    let mut v = [512u128.to_le_bytes(); 8];
    for (i, block) in padded.chunks_exact(BLOCK_BYTES).enumerate() {
        let counter = block_counter(i as u128 * 1024, 1024, bit_len);
        compress(&mut v, block, counter);
    }

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(16).zip(v.iter()) {
        chunk.copy_from_slice(word);
    }
    out
}
