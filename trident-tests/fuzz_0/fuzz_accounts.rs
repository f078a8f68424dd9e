use trident_fuzz::fuzzing::*;

/// Storage for all account addresses used in fuzz testing.
///
/// Docs: https://ackee.xyz/trident/docs/latest/trident-api-macro/trident-types/fuzz-accounts/
#[derive(Default)]
pub struct AccountAddresses {
    pub bank_info: AddressStorage,

    pub bank_vault: AddressStorage,

    pub token_mint: AddressStorage,

    pub user_ata: AddressStorage,

    pub bank_ata: AddressStorage,

    pub user_reserve: AddressStorage,

    pub user: AddressStorage,

    pub authority: AddressStorage,

    pub token_program: AddressStorage,

    pub associated_token_program: AddressStorage,

    pub system_program: AddressStorage,
}
