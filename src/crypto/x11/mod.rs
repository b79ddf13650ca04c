//! X11 proof-of-work hash
//!
//! Eleven 512-bit hash functions run in a fixed chain, each one hashing the
//! previous digest. The block hash is the first 32 bytes of the final digest,
//! kept in the same internal byte order as every other [`Hash`].

mod aes;
mod blake;
mod bmw;
mod cubehash;
mod echo;
mod groestl;
mod jh;
mod luffa;
mod shavite;
mod simd;
mod skein;

pub use blake::blake512;
pub use bmw::bmw512;
pub use cubehash::cubehash512;
pub use echo::echo512;
pub use groestl::groestl512;
pub use jh::jh512;
pub use luffa::luffa512;
pub use shavite::shavite512;
pub use simd::simd512;
pub use skein::skein512;

use sha3::{Digest, Keccak512};

use super::Hash;

/// 512-bit digest produced by every stage of the chain
pub type Digest512 = [u8; 64];

/// Keccak-512 with the original (pre-FIPS) padding
pub fn keccak512(data: &[u8]) -> Digest512 {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Keccak512::digest(data));
    out
}

/// Hash `data` through the full X11 chain
pub fn x11_hash(data: &[u8]) -> Hash {
    let mut digest = blake512(data);
    digest = bmw512(&digest);
    digest = groestl512(&digest);
    digest = skein512(&digest);
    digest = jh512(&digest);
    digest = keccak512(&digest);
    digest = luffa512(&digest);
    digest = cubehash512(&digest);
    digest = shavite512(&digest);
    digest = simd512(&digest);
    digest = echo512(&digest);

    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    Hash(out)
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}

fn read_u64_be(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(word)
}

/// Bit count carried by the block starting at `block_start` bits
///
/// Counts every message bit up to the end of the block. A block made only
/// of padding counts zero.
fn block_counter(block_start: u128, block_bits: u128, message_bits: u128) -> u128 {
    if block_start >= message_bits {
        0
    } else {
        message_bits.min(block_start + block_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::BlockHeader;

    type Stage = fn(&[u8]) -> Digest512;

    const STAGES: [(&str, Stage); 11] = [
        ("blake512", blake512),
        ("bmw512", bmw512),
        ("groestl512", groestl512),
        ("skein512", skein512),
        ("jh512", jh512),
        ("keccak512", keccak512),
        ("luffa512", luffa512),
        ("cubehash512", cubehash512),
        ("shavite512", shavite512),
        ("simd512", simd512),
        ("echo512", echo512),
    ];

    const EMPTY_DIGESTS: [&str; 11] = [
        "a8cfbbd73726062df0c6864dda65defe58ef0cc52a5625090fa17601e1eecd1b628e94f396ae402a00acc9eab77b4d4c2e852aaaa25a636d80af3fc7913ef5b8",
        "6a725655c42bc8a2a20549dd5a233a6a2beb01616975851fd122504e604b46af7d96697d0b6333db1d1709d6df328d2a6c786551b0cce2255e8c7332b4819c0e",
        "6d3ad29d279110eef3adbd66de2a0345a77baede1557f5d099fce0c03d6dc2ba8e6d4a6633dfbd66053c20faa87d1a11f39a7fbe4a6c2f009801370308fc4ad8",
        "bc5b4c50925519c290cc634277ae3d6257212395cba733bbad37a4af0fa06af41fca7903d06564fea7a2d3730dbdb80c1f85562dfcc070334ea4d1d9e72cba7a",
        "90ecf2f76f9d2c8017d979ad5ab96b87d58fc8fc4b83060f3f900774faa2c8fabe69c5f4ff1ec2b61d6b316941cedee117fb04b1f4c5bc1b919ae841c50eec4f",
        "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e",
        "6e7de4501189b3ca58f3ac114916654bbcd4922024b4cc1cd764acfe8ab4b7805df133eab345ffdb1c414564c924f48e0a301824e2ac4c34bd4efde2e43da90e",
        "4a1d00bbcfcb5a9562fb981e7f7db3350fe2658639d948b9d57452c22328bb32f468b072208450bad5ee178271408be0b16e5633ac8a1e3cf9864cfbfc8e043a",
        "a485c1b2578459d1efc5dddd840bb0b4a650ac82fe68f58c4442ccda747da006b2d1dc6b4a4eb7d84ff91e1f466fef429d259acd995dddcad16fa545c7a6e5ba",
        "51a5af7e243cd9a5989f7792c880c4c3168c3d60c4518725fe5757d1f7a69c6366977eaba7905ce2da5d7cfd07773725f0935b55f3efb954996689a49b6d29e0",
        "158f58cc79d300a9aa292515049275d051a28ab931726d0ec44bdd9faef4a702c36db9e7922fff077402236465833c5cc76af4efc352b4b44c7fa15aa0ef234e",
    ];

    #[test]
    fn test_each_stage_on_empty_input() {
        for ((name, stage), expected) in STAGES.iter().zip(EMPTY_DIGESTS) {
            assert_eq!(hex::encode(stage(b"")), expected, "{name}");
        }
    }

    #[test]
    fn test_each_stage_on_one_digest_width() {
        // Every stage after the first sees exactly 64 bytes
        let input: Vec<u8> = (0u8..64).collect();
        let expected = [
            "4d47291b807750d2ce6ced17ae71dc24f5a3205f4fe309537488242c4420cd32d997beda4d560200cbcf3e9d68143e69f08c54b82ce77db7c22d0e17b5a1363e",
            "824168671c2e3f35ebba82b63b9e6c42b8411cdcda1041264bb5f50abd507d1827edcfff050f6c8675cb8ccba8699c843dcf5fb81ccadab1deef0d9cf4770257",
            "6e8c9b90e36cea68c029a7d8b95b718c84205d81be227ba61510f567d46b83edd11f301bf1e7041be991b22fdbee82dbdce7ab0e0ee42a795ca965a439532a39",
            "78cfdbdb2bd125f49d26146e208ebc7ceae57619bd68a2e4e9cdb1db198c995e3795fadbccaabb000463525eee2e1e7f6e8309c765a61e19fccdb18f5284c070",
            "483560d10cadec86db6f390f6267e12f99594587d44c202902e8e4bb6c70c6c7fdff6b19965650e15e240bcfcefe4e5051567ef96c758b800efdcaf50a5d5bbd",
            "59bff1edb37c403bea6387e283c5d4d8878246592807d22328fbc11ec1e029cdb6659300529849189ad647fde9ad4a8918202ba310b936ac6a1d477e4284ac4b",
            "a7fa7b1f6efdeebb4eb2d53b28412a4962fa7236c775a0472e97af3035d0cebb794c97465bc89e9d26983a7b0a9283cc716dee3a6083817030dda4a4625f5d00",
            "501336304d235cf9825da6f26623f20cf338c2efa1eac0f668dc1d99a1f67bf617453a1c861c9628f7b98dd5ca50baf6d75299f13fa43d28d39b40314161135f",
            "4b53734538b113c1637104887e9f2150fa4ad9ec70552d8ed62f0134a47a2f4e8134b2366932983b4127cbcba59cda04bf6d0005b5ba04dea92879f15e80a28a",
            "c09546e438b49f5cd6bd2b51581ad381c14b6d543efc00c193ee94dca4d58b900c5315985a5eac4571c2141cc995c3bc0233aed662094f3fd2176a9c05bfb4e4",
            "2f7a64cec7e07c9d791f902b838e9a776c03da43ef8858e89c16bbfa7eff641d5e309d9a51e13177cbb86fb1021070c64763fa93b39824dafd773154cf2ec058",
        ];
        for ((name, stage), expected) in STAGES.iter().zip(expected) {
            assert_eq!(hex::encode(stage(&input)), expected, "{name}");
        }
    }

    #[test]
    fn test_blake_and_keccak_fox() {
        let fox = b"The quick brown fox jumps over the lazy dog";
        assert!(hex::encode(blake512(fox)).starts_with("1f7e26f63b6ad25a0896fd978fd050a1"));
        assert!(hex::encode(keccak512(fox)).starts_with("d135bb84d0439dbac432247ee573a23e"));
    }

    #[test]
    fn test_skein_multi_block() {
        let descending: Vec<u8> = (0x80..=0xffu8).rev().collect();
        assert!(hex::encode(skein512(&descending)).starts_with("91cca510c263c4ddd010530a33073309"));
    }

    #[test]
    fn test_x11_empty() {
        assert_eq!(
            hex::encode(x11_hash(b"").0),
            "51b572209083576ea221c27e62b4e22063257571ccb6cc3dc3cd17eb67584eba"
        );
    }

    #[test]
    fn test_x11_reference_header() {
        // Header of the first X11 chain: version 1, no parent, single coinbase
        let header = BlockHeader {
            version: 1,
            prev_hash: Hash::zero(),
            merkle_root: Hash::from_hex("e0028eb9648db56b1ac77cf090b99048a8007e2bb64b68f092c03c7f56a662c7").unwrap(),
            time: 1_390_095_618,
            bits: 0x1e0ffff0,
            nonce: 28_917_698,
        };
        assert_eq!(
            x11_hash(&header.to_bytes()).to_hex(),
            "00000ffd590b1485b3caadc19b22e6379c733355108f107a430458cdf3407ab6"
        );
    }

    #[test]
    fn test_block_counter_rules() {
        assert_eq!(block_counter(0, 1024, 0), 0);
        assert_eq!(block_counter(0, 1024, 512), 512);
        assert_eq!(block_counter(0, 1024, 2048), 1024);
        assert_eq!(block_counter(1024, 1024, 1024), 0);
    }
}
