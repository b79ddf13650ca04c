//! Luffa-512: five 256-bit lanes under a sponge-like chaining

use super::{read_u32_be, Digest512};

const BLOCK_BYTES: usize = 32;
const LANES: usize = 5;
const STEPS: usize = 8;

type Lane = [u32; 8];

const IV: [Lane; LANES] = [
    [0x6d251e69, 0x44b051e0, 0x4eaa6fb4, 0xdbf78465, 0x6e292011, 0x90152df4, 0xee058139, 0xdef610bb],
    [0xc3b44b95, 0xd9d2f256, 0x70eee9a0, 0xde099fa3, 0x5d9b0557, 0x8fc944b3, 0xcf1ccf0e, 0x746cd581],
    [0xf7efc89d, 0x5dba5781, 0x04016ce5, 0xad659c05, 0x0306194f, 0x666d1836, 0x24aa230a, 0x8b264ae7],
    [0x858075d5, 0x36d79cce, 0xe571f7d7, 0x204b1f67, 0x35870c6a, 0x57e9e923, 0x14bcb808, 0x7cde72ce],
    [0x6c68e9be, 0x5ec41e22, 0xc825b7c7, 0xaffb4363, 0xf5df3999, 0x0fc688f1, 0xb07224cc, 0x03e86cea],
];

/// Step constants per lane, added to words 0 and 4 respectively
const RC: [([u32; STEPS], [u32; STEPS]); LANES] = [
    (
        [0x303994a6, 0xc0e65299, 0x6cc33a12, 0xdc56983e, 0x1e00108f, 0x7800423d, 0x8f5b7882, 0x96e1db12],
        [0xe0337818, 0x441ba90d, 0x7f34d442, 0x9389217f, 0xe5a8bce6, 0x5274baf4, 0x26889ba7, 0x9a226e9d],
    ),
    (
        [0xb6de10ed, 0x70f47aae, 0x0707a3d4, 0x1c1e8f51, 0x707a3d45, 0xaeb28562, 0xbaca1589, 0x40a46f3e],
        [0x01685f3d, 0x05a17cf4, 0xbd09caca, 0xf4272b28, 0x144ae5cc, 0xfaa7ae2b, 0x2e48f1c1, 0xb923c704],
    ),
    (
        [0xfc20d9d2, 0x34552e25, 0x7ad8818f, 0x8438764a, 0xbb6de032, 0xedb780c8, 0xd9847356, 0xa2c78434],
        [0xe25e72c1, 0xe623bb72, 0x5c58a4a4, 0x1e38e2e7, 0x78e38b9d, 0x27586719, 0x36eda57f, 0x703aace7],
    ),
    (
        [0xb213afa5, 0xc84ebe95, 0x4e608a22, 0x56d858fe, 0x343b138f, 0xd0ec4e3d, 0x2ceb4882, 0xb3ad2208],
        [0xe028c9bf, 0x44756f91, 0x7e8fce32, 0x956548be, 0xfe191be2, 0x3cb226e5, 0x5944a28e, 0xa1c4c355],
    ),
    (
        [0xf0d2e9e3, 0xac11d7fa, 0x1bcb66f2, 0x6f2d9bc9, 0x78602649, 0x8edae952, 0x3b6ba548, 0xedae9520],
        [0x5090d577, 0x2d1925ab, 0xb46496ac, 0xd1925ab0, 0x29131ab6, 0x0fc053c3, 0x3f014f0c, 0xfc053c31],
    ),
];

/// Multiply by x in GF(2^8)[x] over the lane words
fn mult2(s: &Lane) -> Lane {
    let t = s[7];
    [t, s[0] ^ t, s[1], s[2] ^ t, s[3] ^ t, s[4], s[5], s[6]]
}

fn xor(a: &Lane, b: &Lane) -> Lane {
    let mut out = *a;
    for (x, y) in out.iter_mut().zip(b) {
        *x ^= y;
    }
    out
}

/// Bit-sliced 4-bit S-box over four words at indices `i`
fn sub_crumb(a: &mut Lane, i: [usize; 4]) {
    let (mut a0, mut a1, mut a2, mut a3) = (a[i[0]], a[i[1]], a[i[2]], a[i[3]]);
    let mut tmp = a0;
    a0 |= a1;
    a2 ^= a3;
    a1 = !a1;
    a0 ^= a3;
    a3 &= tmp;
    a1 ^= a3;
    a3 ^= a2;
    a2 &= a0;
    a0 = !a0;
    a2 ^= a1;
    a1 |= a3;
    tmp ^= a1;
    a3 ^= a2;
    a2 &= a1;
    a1 ^= a0;
    a0 = tmp;
    a[i[0]] = a0;
    a[i[1]] = a1;
    a[i[2]] = a2;
    a[i[3]] = a3;
}

fn mix_word(a: &mut Lane, i: usize) {
    let (mut u, mut v) = (a[i], a[i + 4]);
    v ^= u;
    u = u.rotate_left(2) ^ v;
    v = v.rotate_left(14) ^ u;
    u = u.rotate_left(10) ^ v;
    v = v.rotate_left(1);
    a[i] = u;
    a[i + 4] = v;
}

fn permute(lane: &Lane, j: usize) -> Lane {
    let mut a = *lane;
    for word in a[4..].iter_mut() {
        *word = word.rotate_left(j as u32);
    }

    let (c0, c4) = &RC[j];
    for r in 0..STEPS {
        sub_crumb(&mut a, [0, 1, 2, 3]);
        sub_crumb(&mut a, [5, 6, 7, 4]);
        for i in 0..4 {
            mix_word(&mut a, i);
        }
        a[0] ^= c0[r];
        a[4] ^= c4[r];
    }
    a
}

/// Message injection followed by the lane permutations
fn round(v: &[Lane; LANES], message: &Lane) -> [Lane; LANES] {
    let sum = v[1..].iter().fold(v[0], |acc, lane| xor(&acc, lane));
    let sum = mult2(&sum);

    let mut mixed = [[0u32; 8]; LANES];
    for j in 0..LANES {
        mixed[j] = xor(&v[j], &sum);
    }

    let mut p = [[0u32; 8]; LANES];
    for j in 0..LANES {
        p[j] = xor(&mult2(&mixed[j]), &mixed[(j + 1) % LANES]);
    }
    for j in 0..LANES {
        mixed[j] = xor(&mult2(&p[j]), &p[(j + LANES - 1) % LANES]);
    }

    let mut m = *message;
    let mut out = [[0u32; 8]; LANES];
    for j in 0..LANES {
        out[j] = permute(&xor(&mixed[j], &m), j);
        m = mult2(&m);
    }
    out
}

pub fn luffa512(data: &[u8]) -> Digest512 {
    let mut padded = data.to_vec();
    padded.push(0x80);
    padded.resize(padded.len().div_ceil(BLOCK_BYTES) * BLOCK_BYTES, 0);

    let mut v = IV;
    for block in padded.chunks_exact(BLOCK_BYTES) {
        let mut m = [0u32; 8];
        for (k, word) in m.iter_mut().enumerate() {
            *word = read_u32_be(&block[4 * k..]);
        }
        v = round(&v, &m);
    }

    let mut out = [0u8; 64];
    for half in out.chunks_exact_mut(BLOCK_BYTES) {
        v = round(&v, &[0u32; 8]);
        let z = v[1..].iter().fold(v[0], |acc, lane| xor(&acc, lane));
        for (chunk, word) in half.chunks_exact_mut(4).zip(z.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
    }
    out
}
