pub const BANK_INFO_SEED: &[u8] = b"BANK_INFO_SEED";
pub const BANK_VAULT_SEED: &[u8] = b"BANK_VAULT_SEED";
pub const USER_RESERVE_SEED: &[u8] = b"USER_RESERVE_SEED";
