//! SIMD-512

use super::{read_u32_le, Digest512};

const BLOCK_BYTES: usize = 128;

const IV: [u32; 32] = [
    0x0BA16B95, 0x72F999AD, 0x9FECC2AE, 0xBA3264FC, 0x5E894929, 0x8E9F30E5, 0x2F1DAA37, 0xF0F2C558,
    0xAC506643, 0xA90635A5, 0xE25B878B, 0xAAB7878F, 0x88817F7A, 0x0A02892B, 0x559A7550, 0x598F657E,
    0x7EEF60A1, 0x6B70E3E8, 0x9C1714D1, 0xB958E2A8, 0xAB02675E, 0xED1C014F, 0xCD8D65BB, 0xFDB7A257,
    0x09254899, 0xD699C7BC, 0x9019B6DC, 0x2B9022E4, 0x8FA14956, 0x21BF9BD3, 0xB94D0943, 0x6FFDDC22,
];

/// Permutation of the expanded-message words used by each round
const WORD_BLOCKS: [[i32; 8]; 4] = [
    [4, 6, 0, 2, 7, 5, 3, 1],
    [15, 11, 12, 8, 9, 13, 10, 14],
    [17, 18, 23, 20, 22, 21, 16, 19],
    [30, 24, 25, 31, 27, 29, 28, 26],
];

/// Per round: low index offset, high index offset, multiplier
const OFFSETS: [(i32, i32, i32); 4] = [(0, 1, 185), (0, 1, 185), (-256, -128, 233), (-383, -255, 233)];
const ROTATIONS: [[u32; 4]; 4] = [[3, 23, 17, 27], [28, 19, 22, 7], [29, 9, 15, 5], [4, 13, 10, 25]];
const PERMS: [usize; 7] = [1, 6, 2, 3, 5, 7, 4];

type Row = [u32; 8];

/// Powers of 41 modulo 257
fn powers() -> [i32; 256] {
    let mut pw = [0i32; 256];
    let mut acc = 1i32;
    for p in pw.iter_mut() {
        *p = acc;
        acc = acc * 41 % 257;
    }
    pw
}

/// Number-theoretic transform of the block, centred on zero
fn expand(block: &[u8], last: bool) -> [i32; 256] {
    let pw = powers();
    let mut y = [0i32; 256];
    for (i, out) in y.iter_mut().enumerate() {
        let mut sum: i64 = 0;
        for (j, &byte) in block.iter().enumerate() {
            sum += byte as i64 * pw[(i * j) & 255] as i64;
        }
        sum += pw[(255 * i) & 255] as i64;
        if last {
            sum += pw[(253 * i) & 255] as i64;
        }
        let mut s = (sum % 257) as i32;
        if s > 128 {
            s -= 257;
        }
        *out = s;
    }
    y
}

fn inner(l: i32, h: i32, mm: i32) -> u32 {
    (((l * mm) as u32) & 0xFFFF).wrapping_add(((h * mm) as u32) << 16)
}

fn if_fn(x: u32, y: u32, z: u32) -> u32 {
    ((y ^ z) & x) ^ z
}

fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | ((x | y) & z)
}

struct State {
    a: Row,
    b: Row,
    c: Row,
    d: Row,
}

impl State {
    fn step(&mut self, w: &[u32], fun: fn(u32, u32, u32) -> u32, r: u32, s: u32, pp: usize) {
        let mut rotated = self.a;
        for word in rotated.iter_mut() {
            *word = word.rotate_left(r);
        }

        let mut next = [0u32; 8];
        for n in 0..8 {
            let tt = self.d[n]
                .wrapping_add(w[n])
                .wrapping_add(fun(self.a[n], self.b[n], self.c[n]));
            next[n] = tt.rotate_left(s).wrapping_add(rotated[pp ^ n]);
        }

        self.d = self.c;
        self.c = self.b;
        self.b = rotated;
        self.a = next;
    }
}

fn row(words: &[u32]) -> Row {
    let mut r = [0u32; 8];
    r.copy_from_slice(&words[..8]);
    r
}

fn compress(h: &mut [u32; 32], block: &[u8], last: bool) {
    let q = expand(block, last);

    let mut s = [0u32; 32];
    for (k, word) in s.iter_mut().enumerate() {
        *word = h[k] ^ read_u32_le(&block[4 * k..]);
    }
    let mut st = State { a: row(&s[0..]), b: row(&s[8..]), c: row(&s[16..]), d: row(&s[24..]) };

    for ri in 0..4 {
        let (o1, o2, mm) = OFFSETS[ri];
        let [p0, p1, p2, p3] = ROTATIONS[ri];
        let rots = [(p0, p1), (p1, p2), (p2, p3), (p3, p0)];
        for k in 0..8 {
            let sb = WORD_BLOCKS[ri][k];
            let mut w = [0u32; 8];
            for (t, word) in w.iter_mut().enumerate() {
                let base = 16 * sb + 2 * t as i32;
                *word = inner(q[(base + o1) as usize], q[(base + o2) as usize], mm);
            }
            let fun: fn(u32, u32, u32) -> u32 = if k < 4 { if_fn } else { maj };
            let (r, s) = rots[k % 4];
            st.step(&w, fun, r, s, PERMS[(k + ri) % 7]);
        }
    }

    st.step(&h[0..8], if_fn, 4, 13, PERMS[4]);
    st.step(&h[8..16], if_fn, 13, 10, PERMS[5]);
    st.step(&h[16..24], if_fn, 10, 25, PERMS[6]);
    st.step(&h[24..32], if_fn, 25, 4, PERMS[0]);

    h[0..8].copy_from_slice(&st.a);
    h[8..16].copy_from_slice(&st.b);
    h[16..24].copy_from_slice(&st.c);
    h[24..32].copy_from_slice(&st.d);
}

pub fn simd512(data: &[u8]) -> Digest512 {
    let mut h = IV;

    let mut padded = data.to_vec();
    padded.resize(data.len().div_ceil(BLOCK_BYTES) * BLOCK_BYTES, 0);
    for block in padded.chunks_exact(BLOCK_BYTES) {
        compress(&mut h, block, false);
    }

    let mut last = [0u8; BLOCK_BYTES];
    last[..8].copy_from_slice(&(data.len() as u64 * 8).to_le_bytes());
    compress(&mut h, &last, true);

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(4).zip(h.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
