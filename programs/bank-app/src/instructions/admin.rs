use anchor_lang::prelude::*;

use crate::{
    constants::BANK_INFO_SEED, error::BankAppError, events::BankStatusChanged, state::BankInfo,
};

#[derive(Accounts)]
pub struct Admin<'info> {
    #[account(
        constraint = authority.key() == bank_info.authority @ BankAppError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [BANK_INFO_SEED],
        bump = bank_info.bump,
        constraint = bank_info.is_initialized @ BankAppError::NotInitialized,
    )]
    pub bank_info: Account<'info, BankInfo>,
}

/// Stop accepting deposits (emergency circuit breaker)
pub fn pause(ctx: Context<Admin>) -> Result<()> {
    let bank_info = &mut ctx.accounts.bank_info;

    bank_info.set_paused(true)?;

    emit!(BankStatusChanged {
        bank_info: bank_info.key(),
        paused: true,
    });

    msg!("Bank app paused by authority: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Resume accepting deposits
pub fn unpause(ctx: Context<Admin>) -> Result<()> {
    let bank_info = &mut ctx.accounts.bank_info;

    bank_info.set_paused(false)?;

    emit!(BankStatusChanged {
        bank_info: bank_info.key(),
        paused: false,
    });

    msg!("Bank app resumed by authority: {}", ctx.accounts.authority.key());

    Ok(())
}
