//! Program-derived addresses used by the bank.
//!
//! Every account the bank owns is located by hashing a fixed seed list with
//! the program id. Nothing stores a mapping from owners to records: clients
//! and the program recompute the same address from the same seeds.

use anchor_lang::prelude::*;

use crate::{
    constants::{BANK_INFO_SEED, BANK_VAULT_SEED, USER_RESERVE_SEED},
    error::BankAppError,
};

/// Derive the canonical program address and bump for `seeds`.
///
/// Fails only when no bump in `0..=255` lands off the ed25519 curve, which
/// does not happen for the seed lists this program uses.
pub fn derive_address(seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, &crate::ID)
        .ok_or_else(|| error!(BankAppError::AddressDerivationFailed))
}

pub fn bank_info_address() -> Result<(Pubkey, u8)> {
    derive_address(&[BANK_INFO_SEED])
}

pub fn bank_vault_address() -> Result<(Pubkey, u8)> {
    derive_address(&[BANK_VAULT_SEED])
}

/// Reserve record for `owner`. A `None` mint addresses the native SOL record.
pub fn user_reserve_address(owner: &Pubkey, mint: Option<&Pubkey>) -> Result<(Pubkey, u8)> {
    match mint {
        Some(mint) => derive_address(&[USER_RESERVE_SEED, owner.as_ref(), mint.as_ref()]),
        None => derive_address(&[USER_RESERVE_SEED, owner.as_ref()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_eq!(bank_info_address().unwrap(), bank_info_address().unwrap());
        assert_eq!(bank_vault_address().unwrap(), bank_vault_address().unwrap());
        assert_eq!(
            user_reserve_address(&owner, Some(&mint)).unwrap(),
            user_reserve_address(&owner, Some(&mint)).unwrap()
        );
    }

    #[test]
    fn test_fixed_addresses_are_distinct() {
        let (bank_info, _) = bank_info_address().unwrap();
        let (bank_vault, _) = bank_vault_address().unwrap();
        assert_ne!(bank_info, bank_vault);
    }

    #[test]
    fn test_matches_raw_find_program_address() {
        let owner = Pubkey::new_unique();
        let expected =
            Pubkey::find_program_address(&[USER_RESERVE_SEED, owner.as_ref()], &crate::ID);
        assert_eq!(user_reserve_address(&owner, None).unwrap(), expected);
    }

    #[test]
    fn test_derived_addresses_are_off_curve() {
        let owner = Pubkey::new_unique();
        let (reserve, _) = user_reserve_address(&owner, None).unwrap();
        let (vault, _) = bank_vault_address().unwrap();
        assert!(!reserve.is_on_curve());
        assert!(!vault.is_on_curve());
    }

    #[test]
    fn test_native_and_token_reserves_differ() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (native, _) = user_reserve_address(&owner, None).unwrap();
        let (token, _) = user_reserve_address(&owner, Some(&mint)).unwrap();
        assert_ne!(native, token);
    }

    #[test]
    fn test_two_mints_give_two_reserves() {
        let owner = Pubkey::new_unique();
        let (a, _) = user_reserve_address(&owner, Some(&Pubkey::new_unique())).unwrap();
        let (b, _) = user_reserve_address(&owner, Some(&Pubkey::new_unique())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_owners_do_not_share_reserves() {
        let mint = Pubkey::new_unique();
        let (a, _) = user_reserve_address(&Pubkey::new_unique(), Some(&mint)).unwrap();
        let (b, _) = user_reserve_address(&Pubkey::new_unique(), Some(&mint)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_seed_order_matters() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (forward, _) = user_reserve_address(&owner, Some(&mint)).unwrap();
        let (swapped, _) = user_reserve_address(&mint, Some(&owner)).unwrap();
        assert_ne!(forward, swapped);
    }
}
