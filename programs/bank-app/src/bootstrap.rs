//! Provisioning of associated token accounts before a token deposit.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::{
    create_idempotent, get_associated_token_address_with_program_id, Create,
};

use crate::{error::BankAppError, events::TokenAccountProvisioned};

/// Outcome of `ensure_token_account`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Provisioning {
    Created,
    /// Account was already there, possibly created by a concurrent depositor
    AlreadyExists,
}

/// Accounts needed to create an associated token account.
pub struct TokenAccountBootstrap<'a, 'info> {
    pub payer: &'a AccountInfo<'info>,
    pub mint: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub associated_token_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> TokenAccountBootstrap<'a, 'info> {
    /// Make sure `token_account` is the associated token account of `owner`
    /// for this mint and that it exists.
    pub fn ensure(
        &self,
        token_account: &AccountInfo<'info>,
        owner: &AccountInfo<'info>,
    ) -> Result<Provisioning> {
        let expected = get_associated_token_address_with_program_id(
            owner.key,
            self.mint.key,
            self.token_program.key,
        );
        require_keys_eq!(
            token_account.key(),
            expected,
            BankAppError::InvalidTokenAccount
        );

        if !token_account.data_is_empty() {
            return Ok(Provisioning::AlreadyExists);
        }

        // create_idempotent succeeds if someone else created it in between
        create_idempotent(CpiContext::new(
            self.associated_token_program.clone(),
            Create {
                payer: self.payer.clone(),
                associated_token: token_account.clone(),
                authority: owner.clone(),
                mint: self.mint.clone(),
                system_program: self.system_program.clone(),
                token_program: self.token_program.clone(),
            },
        ))?;

        msg!(
            "Provisioned token account {} for owner {}",
            token_account.key(),
            owner.key()
        );
        emit!(TokenAccountProvisioned {
            token_account: token_account.key(),
            owner: owner.key(),
            mint: self.mint.key(),
        });

        Ok(Provisioning::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pda::bank_vault_address;
    use anchor_spl::token::ID as TOKEN_PROGRAM_ID;

    #[test]
    fn test_vault_token_account_is_per_mint() {
        let (bank_vault, _) = bank_vault_address().unwrap();
        let a = get_associated_token_address_with_program_id(
            &bank_vault,
            &Pubkey::new_unique(),
            &TOKEN_PROGRAM_ID,
        );
        let b = get_associated_token_address_with_program_id(
            &bank_vault,
            &Pubkey::new_unique(),
            &TOKEN_PROGRAM_ID,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_user_and_vault_accounts_differ() {
        let (bank_vault, _) = bank_vault_address().unwrap();
        let user = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_ne!(
            get_associated_token_address_with_program_id(&user, &mint, &TOKEN_PROGRAM_ID),
            get_associated_token_address_with_program_id(&bank_vault, &mint, &TOKEN_PROGRAM_ID),
        );
    }
}
