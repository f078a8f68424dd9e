use anchor_lang::prelude::*;
use anchor_spl::{associated_token::AssociatedToken, token_interface::TokenInterface};
use spl_token_2022::{
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
    state::Mint,
};

use crate::{
    bootstrap::TokenAccountBootstrap,
    constants::{BANK_INFO_SEED, BANK_VAULT_SEED, USER_RESERVE_SEED},
    error::BankAppError,
    events::Deposited,
    instructions::deposit::validate_deposit,
    state::{BankInfo, ReserveStatus, UserReserve},
    vault::credit_token,
};

#[derive(Accounts)]
pub struct DepositToken<'info> {
    #[account(
        seeds = [BANK_INFO_SEED],
        bump = bank_info.bump,
        constraint = bank_info.is_initialized @ BankAppError::NotInitialized,
    )]
    pub bank_info: Box<Account<'info, BankInfo>>,

    /// CHECK: System-owned PDA, authority of the bank token accounts
    #[account(
        seeds = [BANK_VAULT_SEED],
        bump = bank_info.vault_bump,
    )]
    pub bank_vault: UncheckedAccount<'info>,

    /// CHECK: Parsed in the handler so a bad mint reports InvalidAsset
    pub token_mint: UncheckedAccount<'info>,

    /// CHECK: User's associated token account, created if missing
    #[account(mut)]
    pub user_ata: UncheckedAccount<'info>,

    /// CHECK: Bank vault's associated token account, created if missing
    #[account(mut)]
    pub bank_ata: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserReserve::LEN,
        seeds = [USER_RESERVE_SEED, user.key().as_ref(), token_mint.key().as_ref()],
        bump
    )]
    pub user_reserve: Box<Account<'info, UserReserve>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Returns the mint's decimals if `mint` is an initialized mint owned by
/// `token_program`.
///
/// Mints carrying a transfer fee are refused: the vault would receive less
/// than the amount credited to the reserve.
pub fn validate_token_mint(mint: &AccountInfo, token_program: &Pubkey) -> Result<u8> {
    require_keys_eq!(*mint.owner, *token_program, BankAppError::InvalidAsset);
    require!(
        *token_program == anchor_spl::token::ID || *token_program == spl_token_2022::ID,
        BankAppError::InvalidAsset
    );

    let data = mint.try_borrow_data()?;
    let parsed = StateWithExtensions::<Mint>::unpack(&data)
        .map_err(|_| error!(BankAppError::InvalidAsset))?;
    require!(parsed.base.is_initialized, BankAppError::InvalidAsset);
    require!(
        parsed.get_extension::<TransferFeeConfig>().is_err(),
        BankAppError::InvalidAsset
    );

    Ok(parsed.base.decimals)
}

/// Deposit SPL tokens into the bank's token account for the mint and credit
/// the user's per-mint reserve.
pub fn handler(ctx: Context<DepositToken>, amount: u64) -> Result<()> {
    validate_deposit(&ctx.accounts.bank_info, amount)?;
    let decimals = validate_token_mint(
        &ctx.accounts.token_mint.to_account_info(),
        &ctx.accounts.token_program.key(),
    )?;

    let accounts = &ctx.accounts;
    let user_info = accounts.user.to_account_info();
    let mint_info = accounts.token_mint.to_account_info();
    let system_info = accounts.system_program.to_account_info();
    let token_program_info = accounts.token_program.to_account_info();
    let ata_program_info = accounts.associated_token_program.to_account_info();
    let user_ata_info = accounts.user_ata.to_account_info();
    let bank_ata_info = accounts.bank_ata.to_account_info();

    let bootstrap = TokenAccountBootstrap {
        payer: &user_info,
        mint: &mint_info,
        system_program: &system_info,
        token_program: &token_program_info,
        associated_token_program: &ata_program_info,
    };
    bootstrap.ensure(&user_ata_info, &user_info)?;
    bootstrap.ensure(&bank_ata_info, &accounts.bank_vault.to_account_info())?;

    let user_key = accounts.user.key();
    let mint_key = accounts.token_mint.key();
    let status = ctx
        .accounts
        .user_reserve
        .resolve(user_key, Some(mint_key), ctx.bumps.user_reserve)?;
    if status == ReserveStatus::Created {
        msg!("Created reserve for {} on mint {}", user_key, mint_key);
    }

    // Reject overflow before any tokens move
    let new_total = ctx.accounts.user_reserve.preview_deposit(amount)?;

    credit_token(
        user_ata_info,
        bank_ata_info,
        mint_info,
        user_info,
        token_program_info,
        amount,
        decimals,
    )?;

    let user_reserve = &mut ctx.accounts.user_reserve;
    user_reserve.commit_deposit(new_total);

    emit!(Deposited {
        user: user_key,
        user_reserve: user_reserve.key(),
        mint: Some(mint_key),
        amount,
        deposited_amount: new_total,
    });

    msg!(
        "Deposited {} tokens of {}, reserve total {}",
        amount,
        mint_key,
        new_total
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::{program_option::COption, program_pack::Pack};
    use spl_token_2022::extension::{
        BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut,
    };

    fn mint_state(decimals: u8, is_initialized: bool) -> Mint {
        Mint {
            mint_authority: COption::Some(Pubkey::new_unique()),
            supply: 1_000_000_000,
            decimals,
            is_initialized,
            freeze_authority: COption::None,
        }
    }

    fn plain_mint_data(decimals: u8, is_initialized: bool) -> Vec<u8> {
        let mut data = vec![0u8; Mint::LEN];
        Mint::pack_into_slice(&mint_state(decimals, is_initialized), &mut data);
        data
    }

    fn fee_mint_data(decimals: u8, basis_points: u16) -> Vec<u8> {
        let len =
            ExtensionType::try_calculate_account_len::<Mint>(&[ExtensionType::TransferFeeConfig])
                .unwrap();
        let mut data = vec![0u8; len];
        let mut state = StateWithExtensionsMut::<Mint>::unpack_uninitialized(&mut data).unwrap();
        let fee = state.init_extension::<TransferFeeConfig>(true).unwrap();
        fee.newer_transfer_fee.transfer_fee_basis_points = basis_points.into();
        fee.newer_transfer_fee.maximum_fee = u64::MAX.into();
        fee.older_transfer_fee.transfer_fee_basis_points = basis_points.into();
        fee.older_transfer_fee.maximum_fee = u64::MAX.into();
        state.base = mint_state(decimals, true);
        state.pack_base();
        state.init_account_type().unwrap();
        data
    }

    fn check(data: &mut [u8], owner: &Pubkey, token_program: &Pubkey) -> Result<u8> {
        let key = Pubkey::new_unique();
        let mut lamports = 1_461_600u64;
        let info = AccountInfo::new(&key, false, false, &mut lamports, data, owner, false, 0);
        validate_token_mint(&info, token_program)
    }

    fn invalid_asset() -> anchor_lang::error::Error {
        anchor_lang::error::Error::from(BankAppError::InvalidAsset)
    }

    #[test]
    fn test_classic_mint_accepted() {
        let token = anchor_spl::token::ID;
        let mut data = plain_mint_data(6, true);
        assert_eq!(check(&mut data, &token, &token).unwrap(), 6);
    }

    #[test]
    fn test_token_2022_mint_without_fee_accepted() {
        let token_2022 = spl_token_2022::ID;
        let mut data = plain_mint_data(9, true);
        assert_eq!(check(&mut data, &token_2022, &token_2022).unwrap(), 9);
    }

    #[test]
    fn test_transfer_fee_mint_rejected() {
        let token_2022 = spl_token_2022::ID;
        let mut data = fee_mint_data(6, 500);
        assert_eq!(check(&mut data, &token_2022, &token_2022).unwrap_err(), invalid_asset());

        // a zero fee can be raised later by the fee authority
        let mut data = fee_mint_data(6, 0);
        assert_eq!(check(&mut data, &token_2022, &token_2022).unwrap_err(), invalid_asset());
    }

    #[test]
    fn test_mint_owned_by_other_program_rejected() {
        let token = anchor_spl::token::ID;
        let mut data = plain_mint_data(6, true);
        assert_eq!(
            check(&mut data, &Pubkey::new_unique(), &token).unwrap_err(),
            invalid_asset()
        );
    }

    #[test]
    fn test_unknown_token_program_rejected() {
        let fake_program = Pubkey::new_unique();
        let mut data = plain_mint_data(6, true);
        assert_eq!(
            check(&mut data, &fake_program, &fake_program).unwrap_err(),
            invalid_asset()
        );
    }

    #[test]
    fn test_uninitialized_mint_rejected() {
        let token = anchor_spl::token::ID;
        let mut data = plain_mint_data(6, false);
        assert_eq!(check(&mut data, &token, &token).unwrap_err(), invalid_asset());

        let mut empty = vec![0u8; 0];
        assert_eq!(check(&mut empty, &token, &token).unwrap_err(), invalid_asset());
    }
}
