use anchor_lang::prelude::*;

pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod vault;

use instructions::*;

declare_id!("BkjFh9UbBiUmmV69qiX3HuwLwePyEneFzaGBnEJGqv5T");

#[program]
pub mod bank_app {
    use super::*;

    /// Create the bank info record and fund the native vault.
    /// Fails with AlreadyInitialized on any later call.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Deposit SOL into the vault, creating the user's reserve on first use
    pub fn deposit(ctx: Context<Deposit>, deposit_amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, deposit_amount)
    }

    /// Deposit SPL tokens into the vault's token account for the mint.
    /// Missing associated token accounts are created first.
    pub fn deposit_token(ctx: Context<DepositToken>, deposit_amount: u64) -> Result<()> {
        instructions::deposit_token::handler(ctx, deposit_amount)
    }

    /// Pause all deposits (emergency)
    pub fn pause(ctx: Context<Admin>) -> Result<()> {
        instructions::admin::pause(ctx)
    }

    /// Resume deposits
    pub fn unpause(ctx: Context<Admin>) -> Result<()> {
        instructions::admin::unpause(ctx)
    }

    // ============ View Functions (CPI composable) ============

    /// Cumulative deposited amount of a reserve record
    pub fn reserve_balance(
        ctx: Context<ReserveView>,
        owner: Pubkey,
        mint: Option<Pubkey>,
    ) -> Result<()> {
        instructions::view::reserve_balance(ctx, owner, mint)
    }

    /// Vault balance backing deposits of one asset
    pub fn vault_balance(ctx: Context<VaultView>, mint: Option<Pubkey>) -> Result<()> {
        instructions::view::vault_balance(ctx, mint)
    }
}
