use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;
use anchor_spl::{
    associated_token::get_associated_token_address_with_program_id,
    token_interface::TokenAccount,
};

use crate::{
    constants::{BANK_INFO_SEED, BANK_VAULT_SEED},
    error::BankAppError,
    pda::user_reserve_address,
    state::{BankInfo, UserReserve},
    vault::native_claims,
};

#[derive(Accounts)]
pub struct ReserveView<'info> {
    /// CHECK: Address and contents are checked against the derived reserve
    pub user_reserve: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [BANK_INFO_SEED],
        bump = bank_info.bump,
        constraint = bank_info.is_initialized @ BankAppError::NotInitialized,
    )]
    pub bank_info: Account<'info, BankInfo>,

    /// CHECK: System-owned PDA that only ever holds lamports
    #[account(
        seeds = [BANK_VAULT_SEED],
        bump = bank_info.vault_bump,
    )]
    pub bank_vault: UncheckedAccount<'info>,

    /// Required when querying a token vault
    pub bank_ata: Option<InterfaceAccount<'info, TokenAccount>>,
}

/// Load the reserve record of `owner` for `mint` (`None` = SOL).
///
/// An account at any other address, or one that was never created, is
/// reported as `ReserveNotFound`.
pub fn load_reserve(
    account: &AccountInfo,
    owner: &Pubkey,
    mint: Option<&Pubkey>,
) -> Result<UserReserve> {
    let (expected, _) = user_reserve_address(owner, mint)?;
    require_keys_eq!(account.key(), expected, BankAppError::ReserveNotFound);
    require!(
        account.owner == &crate::ID && !account.data_is_empty(),
        BankAppError::ReserveNotFound
    );

    let data = account.try_borrow_data()?;
    UserReserve::try_deserialize(&mut &data[..])
}

/// Cumulative amount `owner` has deposited of `mint` (`None` = SOL)
pub fn reserve_balance(ctx: Context<ReserveView>, owner: Pubkey, mint: Option<Pubkey>) -> Result<()> {
    let reserve = load_reserve(
        &ctx.accounts.user_reserve.to_account_info(),
        &owner,
        mint.as_ref(),
    )?;

    set_return_data(&reserve.deposited_amount.to_le_bytes());
    Ok(())
}

/// Vault balance backing deposits of `mint` (`None` = SOL, rent reserve excluded)
pub fn vault_balance(ctx: Context<VaultView>, mint: Option<Pubkey>) -> Result<()> {
    let balance = match mint {
        None => native_claims(
            ctx.accounts.bank_vault.lamports(),
            ctx.accounts.bank_info.vault_reserve,
        )?,
        Some(mint) => {
            let bank_ata = ctx
                .accounts
                .bank_ata
                .as_ref()
                .ok_or_else(|| error!(BankAppError::TokenVaultMissing))?;
            let token_program = *bank_ata.to_account_info().owner;
            let expected = get_associated_token_address_with_program_id(
                &ctx.accounts.bank_vault.key(),
                &mint,
                &token_program,
            );
            require_keys_eq!(bank_ata.key(), expected, BankAppError::InvalidTokenAccount);
            bank_ata.amount
        }
    };

    set_return_data(&balance.to_le_bytes());
    Ok(())
}
