//! Custody side of the bank: moving value into the program-owned vaults.
//!
//! Credits only ever add to a vault. The caller has already checked that the
//! matching reserve record can absorb `amount`.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_interface::{transfer_checked, TransferChecked};

use crate::error::BankAppError;

/// Transfer `amount` lamports from `from` into the native vault.
pub fn credit_native<'info>(
    from: AccountInfo<'info>,
    bank_vault: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, BankAppError::InvalidAmount);

    system_program::transfer(
        CpiContext::new(
            system_program,
            Transfer {
                from,
                to: bank_vault,
            },
        ),
        amount,
    )
}

/// Transfer `amount` tokens from the user's token account into the vault's
/// token account for the same mint. The vault account must already exist.
pub fn credit_token<'info>(
    from: AccountInfo<'info>,
    bank_ata: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    require!(amount > 0, BankAppError::InvalidAmount);
    require!(!bank_ata.data_is_empty(), BankAppError::TokenVaultMissing);

    transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                to: bank_ata,
                mint,
                authority,
            },
        ),
        amount,
        decimals,
    )
}

/// Lamports in the native vault that back user deposits.
pub fn native_claims(vault_lamports: u64, vault_reserve: u64) -> Result<u64> {
    vault_lamports
        .checked_sub(vault_reserve)
        .ok_or_else(|| error!(BankAppError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_claims_excludes_reserve() {
        assert_eq!(native_claims(890_880, 890_880).unwrap(), 0);
        assert_eq!(native_claims(890_880 + 2_000_000, 890_880).unwrap(), 2_000_000);
    }

    #[test]
    fn test_native_claims_below_reserve() {
        assert!(native_claims(100, 890_880).is_err());
    }
}
