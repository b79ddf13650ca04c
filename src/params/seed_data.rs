//! Packed fixed-seed tables
//!
//! One 18-byte record per node: IPv6 address (IPv4 mapped) then big-endian port.

/// Main network bootstrap nodes
pub const MAIN_SEEDS: &[u8] = &[
    // 192.0.2.21:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc0, 0x00, 0x02, 0x15,
    0x3a, 0xc7,
    // 192.0.2.87:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc0, 0x00, 0x02, 0x57,
    0x3a, 0xc7,
    // 198.51.100.14:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc6, 0x33, 0x64, 0x0e,
    0x3a, 0xc7,
    // 198.51.100.203:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc6, 0x33, 0x64, 0xcb,
    0x3a, 0xc7,
    // 203.0.113.45:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xcb, 0x00, 0x71, 0x2d,
    0x3a, 0xc7,
    // 203.0.113.160:15047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xcb, 0x00, 0x71, 0xa0,
    0x3a, 0xc7,
    // [2001:db8:15::47]:15047
    0x20, 0x01, 0x0d, 0xb8, 0x00, 0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x47,
    0x3a, 0xc7,
];

/// Test network bootstrap nodes
pub const TESTNET_SEEDS: &[u8] = &[
    // 192.0.2.120:25047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc0, 0x00, 0x02, 0x78,
    0x61, 0xd7,
    // 198.51.100.77:25047
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xc6, 0x33, 0x64, 0x4d,
    0x61, 0xd7,
];
