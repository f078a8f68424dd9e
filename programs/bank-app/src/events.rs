use anchor_lang::prelude::*;

#[event]
pub struct BankInitialized {
    pub bank_info: Pubkey,
    pub bank_vault: Pubkey,
    pub authority: Pubkey,
    pub vault_reserve: u64,
}

#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub user_reserve: Pubkey,
    /// `None` for native SOL deposits
    pub mint: Option<Pubkey>,
    pub amount: u64,
    pub deposited_amount: u64,
}

#[event]
pub struct TokenAccountProvisioned {
    pub token_account: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
}

#[event]
pub struct BankStatusChanged {
    pub bank_info: Pubkey,
    pub paused: bool,
}
