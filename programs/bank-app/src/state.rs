use anchor_lang::prelude::*;

use crate::error::BankAppError;

#[account]
pub struct BankInfo {
    /// Admin who can pause/unpause deposits; fixed at initialization
    pub authority: Pubkey,
    /// Set once by `initialize`
    pub is_initialized: bool,
    /// Emergency pause flag
    pub is_paused: bool,
    /// PDA bump seed
    pub bump: u8,
    /// Bump of the native vault PDA
    pub vault_bump: u8,
    /// Lamports held by the vault that back no deposit (rent exemption)
    pub vault_reserve: u64,
}

impl BankInfo {
    pub const LEN: usize = 8 + // discriminator
        32 + // authority
        1 +  // is_initialized
        1 +  // is_paused
        1 +  // bump
        1 +  // vault_bump
        8; // vault_reserve

    /// `initialize` may only run against a freshly allocated record.
    pub fn ensure_uninitialized(&self) -> Result<()> {
        require!(!self.is_initialized, BankAppError::AlreadyInitialized);
        Ok(())
    }

    /// Flip the pause flag; setting it to its current value is rejected.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            require!(!self.is_paused, BankAppError::BankPaused);
        } else {
            require!(self.is_paused, BankAppError::BankNotPaused);
        }
        self.is_paused = paused;
        Ok(())
    }
}

/// Result of binding a reserve record to its `(owner, mint)` pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReserveStatus {
    /// Record was freshly allocated by this instruction
    Created,
    /// Record already existed for the same pair
    Existing,
}

/// Cumulative deposits of one owner for one asset.
#[account]
#[derive(Debug)]
pub struct UserReserve {
    pub owner: Pubkey,
    /// `None` for native SOL
    pub mint: Option<Pubkey>,
    pub deposited_amount: u64,
    pub bump: u8,
}

impl UserReserve {
    pub const LEN: usize = 8 + // discriminator
        32 +     // owner
        1 + 32 + // mint (Option<Pubkey>)
        8 +      // deposited_amount
        1; // bump

    /// Bind a zeroed record to `(owner, mint)`, or confirm an existing record
    /// already belongs to that pair. Binding never changes an existing pair.
    pub fn resolve(&mut self, owner: Pubkey, mint: Option<Pubkey>, bump: u8) -> Result<ReserveStatus> {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.mint = mint;
            self.deposited_amount = 0;
            self.bump = bump;
            return Ok(ReserveStatus::Created);
        }

        require_keys_eq!(self.owner, owner, BankAppError::ReserveMismatch);
        require!(self.mint == mint, BankAppError::ReserveMismatch);

        Ok(ReserveStatus::Existing)
    }

    /// Total after depositing `amount`, without mutating the record.
    pub fn preview_deposit(&self, amount: u64) -> Result<u64> {
        require!(amount > 0, BankAppError::InvalidAmount);

        self.deposited_amount
            .checked_add(amount)
            .ok_or_else(|| error!(BankAppError::MathOverflow))
    }

    /// Record a total previously computed by `preview_deposit`.
    pub fn commit_deposit(&mut self, new_total: u64) {
        debug_assert!(new_total >= self.deposited_amount);
        self.deposited_amount = new_total;
    }

    /// `preview_deposit` followed by `commit_deposit`, for callers with no
    /// value transfer to sequence between the two.
    pub fn increment(&mut self, amount: u64) -> Result<u64> {
        let new_total = self.preview_deposit(amount)?;
        self.commit_deposit(new_total);
        Ok(new_total)
    }
}
