use anchor_lang::prelude::*;

use crate::{
    constants::{BANK_INFO_SEED, BANK_VAULT_SEED, USER_RESERVE_SEED},
    error::BankAppError,
    events::Deposited,
    state::{BankInfo, ReserveStatus, UserReserve},
    vault::credit_native,
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        seeds = [BANK_INFO_SEED],
        bump = bank_info.bump,
        constraint = bank_info.is_initialized @ BankAppError::NotInitialized,
    )]
    pub bank_info: Box<Account<'info, BankInfo>>,

    /// CHECK: System-owned PDA that only ever holds lamports
    #[account(
        mut,
        seeds = [BANK_VAULT_SEED],
        bump = bank_info.vault_bump,
    )]
    pub bank_vault: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserReserve::LEN,
        seeds = [USER_RESERVE_SEED, user.key().as_ref()],
        bump
    )]
    pub user_reserve: Box<Account<'info, UserReserve>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Checks shared by both deposit paths, before anything is resolved.
pub fn validate_deposit(bank_info: &BankInfo, amount: u64) -> Result<()> {
    require!(!bank_info.is_paused, BankAppError::BankPaused);
    require!(amount > 0, BankAppError::InvalidAmount);
    Ok(())
}

/// Deposit native SOL into the bank vault and credit the user's reserve.
pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    validate_deposit(&ctx.accounts.bank_info, amount)?;

    let user_key = ctx.accounts.user.key();
    let status = ctx
        .accounts
        .user_reserve
        .resolve(user_key, None, ctx.bumps.user_reserve)?;
    if status == ReserveStatus::Created {
        msg!("Created native reserve for {}", user_key);
    }

    // Reject overflow before any lamports move
    let new_total = ctx.accounts.user_reserve.preview_deposit(amount)?;

    credit_native(
        ctx.accounts.user.to_account_info(),
        ctx.accounts.bank_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        amount,
    )?;

    let user_reserve = &mut ctx.accounts.user_reserve;
    user_reserve.commit_deposit(new_total);

    emit!(Deposited {
        user: user_key,
        user_reserve: user_reserve.key(),
        mint: None,
        amount,
        deposited_amount: new_total,
    });

    msg!("Deposited {} lamports, reserve total {}", amount, new_total);

    Ok(())
}
