//! Blue Midnight Wish 512

use super::{read_u64_le, Digest512};

const BLOCK_BYTES: usize = 128;

/// Signed message-word combinations feeding the first sixteen quad words
const WD: [[(usize, bool); 5]; 16] = [
    [(5, true), (7, false), (10, true), (13, true), (14, true)],
    [(6, true), (8, false), (11, true), (14, true), (15, false)],
    [(0, true), (7, true), (9, true), (12, false), (15, true)],
    [(0, true), (1, false), (8, true), (10, false), (13, true)],
    [(1, true), (2, true), (9, true), (11, false), (14, false)],
    [(3, true), (2, false), (10, true), (12, false), (15, true)],
    [(4, true), (0, false), (3, false), (11, false), (13, true)],
    [(1, true), (4, false), (5, false), (12, false), (14, false)],
    [(2, true), (5, false), (6, false), (13, true), (15, false)],
    [(0, true), (3, false), (6, true), (7, false), (14, true)],
    [(8, true), (1, false), (4, false), (7, false), (15, true)],
    [(8, true), (0, false), (2, false), (5, false), (9, true)],
    [(1, true), (3, true), (6, false), (9, false), (10, true)],
    [(2, true), (4, true), (7, true), (10, true), (11, true)],
    [(3, true), (5, false), (8, true), (11, false), (12, false)],
    [(12, true), (4, false), (6, false), (9, false), (13, true)],
];

const RR: [u32; 7] = [5, 11, 27, 32, 37, 43, 53];

fn s0(x: u64) -> u64 {
    (x >> 1) ^ (x << 3) ^ x.rotate_left(4) ^ x.rotate_left(37)
}

fn s1(x: u64) -> u64 {
    (x >> 1) ^ (x << 2) ^ x.rotate_left(13) ^ x.rotate_left(43)
}

fn s2(x: u64) -> u64 {
    (x >> 2) ^ (x << 1) ^ x.rotate_left(19) ^ x.rotate_left(53)
}

fn s3(x: u64) -> u64 {
    (x >> 2) ^ (x << 2) ^ x.rotate_left(28) ^ x.rotate_left(59)
}

fn s4(x: u64) -> u64 {
    (x >> 1) ^ x
}

fn s5(x: u64) -> u64 {
    (x >> 2) ^ x
}

fn iv() -> [u64; 16] {
    let mut h = [0u64; 16];
    for (i, word) in h.iter_mut().enumerate() {
        let base = 0x80 + 8 * i as u64;
        *word = (0..8).fold(0u64, |acc, k| (acc << 8) | (base + k));
    }
    h
}

fn compress(h: &[u64; 16], m: &[u64; 16]) -> [u64; 16] {
    let mut x = [0u64; 16];
    for i in 0..16 {
        x[i] = m[i] ^ h[i];
    }

    let mut q = [0u64; 32];
    let first: [fn(u64) -> u64; 5] = [s0, s1, s2, s3, s4];
    for i in 0..16 {
        let w = WD[i].iter().fold(0u64, |acc, &(j, plus)| {
            if plus {
                acc.wrapping_add(x[j])
            } else {
                acc.wrapping_sub(x[j])
            }
        });
        q[i] = first[i % 5](w).wrapping_add(h[(i + 1) % 16]);
    }

    let add_element = |j: usize| -> u64 {
        let i = j - 16;
        let rot = |k: usize| m[k % 16].rotate_left((k % 16) as u32 + 1);
        rot(i)
            .wrapping_add(rot(i + 3))
            .wrapping_sub(rot(i + 10))
            .wrapping_add((j as u64).wrapping_mul(0x0555555555555555))
            ^ h[(i + 7) % 16]
    };

    let expand1: [fn(u64) -> u64; 4] = [s1, s2, s3, s0];
    for j in 16..18 {
        let mut sum = 0u64;
        for k in 0..16 {
            sum = sum.wrapping_add(expand1[k % 4](q[j - 16 + k]));
        }
        q[j] = sum.wrapping_add(add_element(j));
    }
    for j in 18..32 {
        let mut sum = 0u64;
        for k in 0..14 {
            let word = q[j - 16 + k];
            sum = sum.wrapping_add(if k % 2 == 0 { word } else { word.rotate_left(RR[k / 2]) });
        }
        sum = sum.wrapping_add(s4(q[j - 2])).wrapping_add(s5(q[j - 1]));
        q[j] = sum.wrapping_add(add_element(j));
    }

    let xl = q[16..24].iter().fold(0u64, |acc, w| acc ^ w);
    let xh = q[24..32].iter().fold(xl, |acc, w| acc ^ w);

    let mut n = [0u64; 16];
    n[0] = ((xh << 5) ^ (q[16] >> 5) ^ m[0]).wrapping_add(xl ^ q[24] ^ q[0]);
    n[1] = ((xh >> 7) ^ (q[17] << 8) ^ m[1]).wrapping_add(xl ^ q[25] ^ q[1]);
    n[2] = ((xh >> 5) ^ (q[18] << 5) ^ m[2]).wrapping_add(xl ^ q[26] ^ q[2]);
    n[3] = ((xh >> 1) ^ (q[19] << 5) ^ m[3]).wrapping_add(xl ^ q[27] ^ q[3]);
    n[4] = ((xh >> 3) ^ q[20] ^ m[4]).wrapping_add(xl ^ q[28] ^ q[4]);
    n[5] = ((xh << 6) ^ (q[21] >> 6) ^ m[5]).wrapping_add(xl ^ q[29] ^ q[5]);
    n[6] = ((xh >> 4) ^ (q[22] << 6) ^ m[6]).wrapping_add(xl ^ q[30] ^ q[6]);
    n[7] = ((xh >> 11) ^ (q[23] << 2) ^ m[7]).wrapping_add(xl ^ q[31] ^ q[7]);

    let tail: [(u64, usize); 8] = [
        (xl << 8, 23),
        (xl >> 6, 16),
        (xl << 6, 17),
        (xl << 4, 18),
        (xl >> 3, 19),
        (xl >> 4, 20),
        (xl >> 7, 21),
        (xl >> 2, 22),
    ];
    for (k, &(shifted, qi)) in tail.iter().enumerate() {
        let i = k + 8;
        n[i] = n[(k + 4) % 8]
            .rotate_left(9 + k as u32)
            .wrapping_add(xh ^ q[i + 16] ^ m[i])
            .wrapping_add(shifted ^ q[qi] ^ q[i]);
    }
    n
}

pub fn bmw512(data: &[u8]) -> Digest512 {
    let mut padded = data.to_vec();
    padded.push(0x80);
    while padded.len() % BLOCK_BYTES != 120 {
        padded.push(0);
    }
    padded.extend_from_slice(&(data.len() as u64 * 8).to_le_bytes());

    let mut h = iv();
    for block in padded.chunks_exact(BLOCK_BYTES) {
        let mut m = [0u64; 16];
        for (i, word) in m.iter_mut().enumerate() {
            *word = read_u64_le(&block[8 * i..]);
        }
        h = compress(&h, &m);
    }

    let mut finalizer = [0u64; 16];
    for (i, word) in finalizer.iter_mut().enumerate() {
        *word = 0xaaaaaaaaaaaaaaa0 + i as u64;
    }
    let h = compress(&finalizer, &h);

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(8).zip(h[8..].iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
