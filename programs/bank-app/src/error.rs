use anchor_lang::prelude::*;

#[error_code]
pub enum BankAppError {
    #[msg("Bank is already initialized")]
    AlreadyInitialized,

    #[msg("Bank is not initialized")]
    NotInitialized,

    #[msg("Reserve record not found")]
    ReserveNotFound,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Token mint is not a valid mint for the given token program")]
    InvalidAsset,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Reserve record belongs to a different owner or asset")]
    ReserveMismatch,

    #[msg("Vault token account has not been provisioned")]
    TokenVaultMissing,

    #[msg("Token account does not match the expected associated address")]
    InvalidTokenAccount,

    #[msg("No bump yields a valid program address for these seeds")]
    AddressDerivationFailed,

    #[msg("The bank app is currently paused")]
    BankPaused,

    #[msg("The bank app is not paused")]
    BankNotPaused,

    #[msg("Unauthorized - caller is not bank authority")]
    Unauthorized,
}
