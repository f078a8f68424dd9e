use anchor_lang::prelude::*;

use crate::{
    constants::{BANK_INFO_SEED, BANK_VAULT_SEED},
    events::BankInitialized,
    state::BankInfo,
    vault::credit_native,
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = BankInfo::LEN,
        seeds = [BANK_INFO_SEED],
        bump
    )]
    pub bank_info: Account<'info, BankInfo>,

    /// CHECK: System-owned PDA that only ever holds lamports
    #[account(
        mut,
        seeds = [BANK_VAULT_SEED],
        bump
    )]
    pub bank_vault: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    ctx.accounts.bank_info.ensure_uninitialized()?;

    // Fund the vault up to rent exemption so small deposits never fail the
    // runtime's rent check. Whatever sits in the vault now backs no deposit.
    let rent_minimum = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.bank_vault.lamports();
    if vault_lamports < rent_minimum {
        credit_native(
            ctx.accounts.authority.to_account_info(),
            ctx.accounts.bank_vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            rent_minimum - vault_lamports,
        )?;
    }

    let bank_info = &mut ctx.accounts.bank_info;
    bank_info.authority = ctx.accounts.authority.key();
    bank_info.is_initialized = true;
    bank_info.is_paused = false;
    bank_info.bump = ctx.bumps.bank_info;
    bank_info.vault_bump = ctx.bumps.bank_vault;
    bank_info.vault_reserve = ctx.accounts.bank_vault.lamports();

    emit!(BankInitialized {
        bank_info: bank_info.key(),
        bank_vault: ctx.accounts.bank_vault.key(),
        authority: bank_info.authority,
        vault_reserve: bank_info.vault_reserve,
    });

    msg!("Bank initialized by authority: {}", bank_info.authority);

    Ok(())
}
