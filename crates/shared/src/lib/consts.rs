/// BLS12-381 compressed public key length.
pub const PUBKEY_LENGTH: usize = 48;
/// BLS12-381 compressed signature length.
pub const SIGNATURE_LENGTH: usize = 96;
/// `r || s || v`
pub const AUTHORIZATION_LENGTH: usize = 65;

pub const DEPOSIT_SIZE_ETH: u64 = 32;
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;
