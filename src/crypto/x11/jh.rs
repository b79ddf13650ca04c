//! JH-512, nibble-sliced reference form

use super::Digest512;

const ROUNDS: usize = 42;
const BLOCK_BYTES: usize = 64;

const SBOX: [[u8; 16]; 2] = [
    [9, 0, 4, 11, 13, 12, 3, 15, 1, 10, 2, 6, 7, 5, 8, 14],
    [3, 12, 6, 13, 5, 7, 1, 9, 15, 2, 0, 4, 11, 10, 14, 8],
];

/// Initial round constant: fractional part of sqrt(2), one nibble per entry
const RC0_HEX: &[u8; 64] = b"6a09e667f3bcc908b2fb1366ea957d3e3adec17512775099da2f590b0667322a";

fn initial_constant() -> [u8; 64] {
    let mut rc = [0u8; 64];
    for (nibble, &c) in rc.iter_mut().zip(RC0_HEX.iter()) {
        *nibble = match c {
            b'0'..=b'9' => c - b'0',
            _ => c - b'a' + 10,
        };
    }
    rc
}

/// Linear transform over GF(2^4)
fn double(a: u8) -> u8 {
    ((a << 1) ^ (a >> 3) ^ ((a >> 2) & 2)) & 0x0f
}

/// One round over `N` nibbles; `rc` selects the S-box per nibble when present
fn round<const N: usize>(a: &[u8; N], rc: Option<&[u8; 64]>) -> [u8; N] {
    let mut tem = [0u8; N];
    for i in 0..N {
        let select = rc.map_or(0, |rc| (rc[i >> 2] >> (3 - (i & 3))) & 1);
        tem[i] = SBOX[select as usize][a[i] as usize];
    }

    for i in (0..N).step_by(2) {
        tem[i + 1] ^= double(tem[i]);
        tem[i] ^= double(tem[i + 1]);
    }
    for i in (0..N).step_by(4) {
        tem.swap(i + 2, i + 3);
    }

    let half = N / 2;
    let mut out = [0u8; N];
    for i in 0..half {
        out[i] = tem[2 * i];
        out[i + half] = tem[2 * i + 1];
    }
    for i in (half..N).step_by(2) {
        out.swap(i, i + 1);
    }
    out
}

fn bit(h: &[u8; 128], k: usize) -> u8 {
    (h[k >> 3] >> (7 - (k & 7))) & 1
}

fn e8(h: &[u8; 128]) -> [u8; 128] {
    let mut tem = [0u8; 256];
    for (i, nibble) in tem.iter_mut().enumerate() {
        *nibble = (bit(h, i) << 3) | (bit(h, i + 256) << 2) | (bit(h, i + 512) << 1) | bit(h, i + 768);
    }

    let mut a = [0u8; 256];
    for i in 0..128 {
        a[2 * i] = tem[i];
        a[2 * i + 1] = tem[i + 128];
    }

    let mut rc = initial_constant();
    for _ in 0..ROUNDS {
        a = round(&a, Some(&rc));
        rc = round(&rc, None);
    }

    for i in 0..128 {
        tem[i] = a[2 * i];
        tem[i + 128] = a[2 * i + 1];
    }

    let mut out = [0u8; 128];
    for (i, &nibble) in tem.iter().enumerate() {
        let shift = 7 - (i & 7);
        out[i >> 3] |= ((nibble >> 3) & 1) << shift;
        out[(i + 256) >> 3] |= ((nibble >> 2) & 1) << shift;
        out[(i + 512) >> 3] |= ((nibble >> 1) & 1) << shift;
        out[(i + 768) >> 3] |= (nibble & 1) << shift;
    }
    out
}

fn f8(h: &mut [u8; 128], block: &[u8]) {
    for (byte, m) in h.iter_mut().zip(block) {
        *byte ^= m;
    }
    *h = e8(h);
    for (byte, m) in h[64..].iter_mut().zip(block) {
        *byte ^= m;
    }
}

pub fn jh512(data: &[u8]) -> Digest512 {
    let mut h = [0u8; 128];
    h[0] = 0x02;
    f8(&mut h, &[0u8; BLOCK_BYTES]);

    // A full padding block is always appended, even when the message is aligned
    let pad = BLOCK_BYTES + (BLOCK_BYTES - data.len() % BLOCK_BYTES) % BLOCK_BYTES;
    let mut padded = data.to_vec();
    padded.push(0x80);
    padded.resize(data.len() + pad - 16, 0);
    padded.extend_from_slice(&(data.len() as u128 * 8).to_be_bytes());

    for block in padded.chunks_exact(BLOCK_BYTES) {
        f8(&mut h, block);
    }

    let mut out = [0u8; 64];
    out.copy_from_slice(&h[64..]);
    out
}
