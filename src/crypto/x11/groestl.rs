//! Groestl-512

use super::aes::{gmul, SBOX};
use super::Digest512;

const COLS: usize = 16;
const BLOCK_BYTES: usize = 128;
const ROUNDS: usize = 14;

const SHIFT_P: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 11];
const SHIFT_Q: [usize; 8] = [1, 3, 5, 11, 0, 2, 4, 6];
const MIX: [u8; 8] = [2, 2, 3, 4, 5, 3, 5, 7];

/// Eight rows of sixteen byte columns
type State = [[u8; COLS]; 8];

#[derive(Clone, Copy)]
enum Permutation {
    P,
    Q,
}

fn to_state(bytes: &[u8]) -> State {
    let mut st = [[0u8; COLS]; 8];
    for (i, row) in st.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = bytes[8 * j + i];
        }
    }
    st
}

fn from_state(st: &State) -> [u8; BLOCK_BYTES] {
    let mut out = [0u8; BLOCK_BYTES];
    for (i, row) in st.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            out[8 * j + i] = cell;
        }
    }
    out
}

fn permute(bytes: &[u8], which: Permutation) -> [u8; BLOCK_BYTES] {
    let mut st = to_state(bytes);
    let shifts = match which {
        Permutation::P => &SHIFT_P,
        Permutation::Q => &SHIFT_Q,
    };

    for round in 0..ROUNDS {
        let r = round as u8;
        for j in 0..COLS {
            let col = (j as u8) << 4;
            match which {
                Permutation::P => st[0][j] ^= col ^ r,
                Permutation::Q => {
                    for row in st.iter_mut().take(7) {
                        row[j] ^= 0xff;
                    }
                    st[7][j] ^= col ^ 0xff ^ r;
                }
            }
        }

        let mut shifted = [[0u8; COLS]; 8];
        for i in 0..8 {
            for j in 0..COLS {
                shifted[i][j] = SBOX[st[i][(j + shifts[i]) % COLS] as usize];
            }
        }

        for j in 0..COLS {
            for i in 0..8 {
                st[i][j] = (0..8).fold(0u8, |acc, k| acc ^ gmul(MIX[(k + 8 - i) % 8], shifted[k][j]));
            }
        }
    }
    from_state(&st)
}

pub fn groestl512(data: &[u8]) -> Digest512 {
    let mut padded = data.to_vec();
    padded.push(0x80);
    while (padded.len() + 8) % BLOCK_BYTES != 0 {
        padded.push(0);
    }
    let blocks = (padded.len() + 8) / BLOCK_BYTES;
    padded.extend_from_slice(&(blocks as u64).to_be_bytes());

    let mut h = [0u8; BLOCK_BYTES];
    h[BLOCK_BYTES - 2] = 0x02;

    for block in padded.chunks_exact(BLOCK_BYTES) {
        let mut mixed = [0u8; BLOCK_BYTES];
        for (k, byte) in mixed.iter_mut().enumerate() {
            *byte = h[k] ^ block[k];
        }
        let p = permute(&mixed, Permutation::P);
        let q = permute(block, Permutation::Q);
        for k in 0..BLOCK_BYTES {
            h[k] ^= p[k] ^ q[k];
        }
    }

    let p = permute(&h, Permutation::P);
    let mut out = [0u8; 64];
    for (k, byte) in out.iter_mut().enumerate() {
        *byte = p[64 + k] ^ h[64 + k];
    }
    out
}
