use std::collections::{HashMap, HashSet};

use anchor_lang::prelude::Pubkey;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;
use bank_app::{
    bootstrap::Provisioning,
    pda::{bank_vault_address, user_reserve_address},
    state::{ReserveStatus, UserReserve},
};
use fuzz_accounts::*;
use trident_fuzz::fuzzing::*;
mod fuzz_accounts;

const USERS: usize = 4;
const MINTS: usize = 3;

/// Bank state tracking for invariant checks
#[derive(Default, Clone)]
struct BankTracker {
    initialized: bool,
    vault_reserve: u64,
    vault_lamports: u64,
    /// Vault token balance per mint
    token_vaults: HashMap<Pubkey, u64>,
    /// Reserve records keyed by derived address
    reserves: HashMap<Pubkey, UserReserve>,
    /// Existing associated token accounts
    token_accounts: HashSet<Pubkey>,
    /// Provisioning attempts / actual creations per vault token account
    provision_attempts: HashMap<Pubkey, u32>,
    provision_creations: HashMap<Pubkey, u32>,
    users: Vec<Pubkey>,
    mints: Vec<Pubkey>,
}

#[derive(FuzzTestMethods)]
struct FuzzTest {
    trident: Trident,
    fuzz_accounts: AccountAddresses,
    bank_tracker: BankTracker,
}

#[flow_executor]
impl FuzzTest {
    fn new() -> Self {
        Self {
            trident: Trident::default(),
            fuzz_accounts: AccountAddresses::default(),
            bank_tracker: BankTracker::default(),
        }
    }

    #[init]
    fn start(&mut self) {
        self.bank_tracker = BankTracker {
            users: (0..USERS).map(|_| Pubkey::new_unique()).collect(),
            mints: (0..MINTS).map(|_| Pubkey::new_unique()).collect(),
            ..BankTracker::default()
        };
    }

    /// Initialize is accepted once and is a no-op afterwards
    #[flow]
    fn flow_initialize(&mut self) {
        if self.bank_tracker.initialized {
            // AlreadyInitialized: nothing about the vault changes
            return;
        }

        // rent-exempt minimum for a zero-data account
        self.bank_tracker.vault_reserve = 890_880;
        self.bank_tracker.vault_lamports = self.bank_tracker.vault_reserve;
        self.bank_tracker.initialized = true;
    }

    /// Native deposits with fuzzed amounts (zero included)
    #[flow]
    fn flow_deposit(&mut self) {
        if !self.bank_tracker.initialized {
            return;
        }

        let user = self.pick_user();
        let amount: u64 = rand::random::<u64>() % 1_000_000_000_000;
        self.apply_deposit(user, None, amount);
    }

    /// Two depositors deposit the same mint in one flow. Both provision the
    /// shared vault token account; the second attempt finds it in place.
    #[flow]
    fn flow_deposit_token(&mut self) {
        if !self.bank_tracker.initialized {
            return;
        }

        let mint = self.bank_tracker.mints[rand::random::<usize>() % MINTS];
        let (bank_vault, _) = bank_vault_address().unwrap();
        let bank_ata =
            get_associated_token_address_with_program_id(&bank_vault, &mint, &anchor_spl::token::ID);
        let vault_existed = self.bank_tracker.token_accounts.contains(&bank_ata);

        let first = self.pick_user();
        let second = self.pick_user();
        let mut outcomes = Vec::new();
        for user in [first, second] {
            let user_ata =
                get_associated_token_address_with_program_id(&user, &mint, &anchor_spl::token::ID);
            self.ensure_token_account(user_ata);
            outcomes.push(self.ensure_token_account(bank_ata));

            let amount: u64 = rand::random::<u64>() % 1_000_000_000_000;
            self.apply_deposit(user, Some(mint), amount);
        }

        let expected_first = if vault_existed {
            Provisioning::AlreadyExists
        } else {
            Provisioning::Created
        };
        assert_eq!(outcomes[0], expected_first);
        assert_eq!(
            outcomes[1],
            Provisioning::AlreadyExists,
            "Invariant: second provisioning attempt is a benign collision"
        );
    }

    /// Deposits close to u64::MAX must be rejected without side effects
    #[flow]
    fn flow_overflow_attempt(&mut self) {
        if !self.bank_tracker.initialized {
            return;
        }

        let user = self.pick_user();
        let (address, _) = user_reserve_address(&user, None).unwrap();
        let Some(reserve) = self.bank_tracker.reserves.get(&address) else {
            return;
        };
        if reserve.deposited_amount == 0 {
            return;
        }

        let before = reserve.deposited_amount;
        let lamports_before = self.bank_tracker.vault_lamports;
        self.apply_deposit(user, None, u64::MAX);

        let after = self.bank_tracker.reserves[&address].deposited_amount;
        assert_eq!(before, after, "Invariant: overflowing deposit must not change reserve");
        assert_eq!(
            lamports_before, self.bank_tracker.vault_lamports,
            "Invariant: overflowing deposit must not move lamports"
        );
    }

    #[end]
    fn end(&mut self) {
        if !self.bank_tracker.initialized {
            return;
        }

        // Invariant: native vault minus reserve equals native claims
        let native_claims: u128 = self
            .bank_tracker
            .reserves
            .values()
            .filter(|r| r.mint.is_none())
            .map(|r| r.deposited_amount as u128)
            .sum();
        assert_eq!(
            (self.bank_tracker.vault_lamports - self.bank_tracker.vault_reserve) as u128,
            native_claims,
            "Invariant: native vault must match sum of native reserves"
        );

        // Invariant: each token vault equals the claims on its mint
        for (mint, balance) in &self.bank_tracker.token_vaults {
            let claims: u128 = self
                .bank_tracker
                .reserves
                .values()
                .filter(|r| r.mint == Some(*mint))
                .map(|r| r.deposited_amount as u128)
                .sum();
            assert_eq!(*balance as u128, claims, "Invariant: token vault must match claims");
        }

        // Invariant: each vault token account was attempted repeatedly but
        // created exactly once
        for (account, attempts) in &self.bank_tracker.provision_attempts {
            let creations = self
                .bank_tracker
                .provision_creations
                .get(account)
                .copied()
                .unwrap_or(0);
            assert_eq!(creations, 1, "Invariant: vault token account created once");
            assert!(*attempts >= 2, "Invariant: every token flow provisions twice");
        }

        // Invariant: every record sits at the address derived from its own pair
        for (address, reserve) in &self.bank_tracker.reserves {
            let (expected, _) = user_reserve_address(&reserve.owner, reserve.mint.as_ref()).unwrap();
            assert_eq!(*address, expected, "Invariant: reserve address matches its pair");
        }

        let (vault, _) = bank_vault_address().unwrap();
        assert!(!self.bank_tracker.reserves.contains_key(&vault));
    }

    fn pick_user(&self) -> Pubkey {
        self.bank_tracker.users[rand::random::<usize>() % USERS]
    }

    // Mirrors TokenAccountBootstrap::ensure with an idempotent create.
    fn ensure_token_account(&mut self, account: Pubkey) -> Provisioning {
        let (bank_vault, _) = bank_vault_address().unwrap();
        let is_vault_account = self.bank_tracker.mints.iter().any(|mint| {
            get_associated_token_address_with_program_id(&bank_vault, mint, &anchor_spl::token::ID)
                == account
        });
        if is_vault_account {
            *self.bank_tracker.provision_attempts.entry(account).or_insert(0) += 1;
        }

        if !self.bank_tracker.token_accounts.insert(account) {
            return Provisioning::AlreadyExists;
        }
        if is_vault_account {
            *self.bank_tracker.provision_creations.entry(account).or_insert(0) += 1;
        }
        Provisioning::Created
    }

    // Mirrors the on-chain ordering: resolve, preview, move value, record.
    fn apply_deposit(&mut self, user: Pubkey, mint: Option<Pubkey>, amount: u64) {
        if amount == 0 {
            return;
        }

        let (address, bump) = user_reserve_address(&user, mint.as_ref()).unwrap();
        let mut reserve = self
            .bank_tracker
            .reserves
            .get(&address)
            .cloned()
            .unwrap_or(UserReserve {
                owner: Pubkey::default(),
                mint: None,
                deposited_amount: 0,
                bump: 0,
            });

        let status = reserve.resolve(user, mint, bump).unwrap();
        if status == ReserveStatus::Existing {
            assert!(self.bank_tracker.reserves.contains_key(&address));
        }

        let Ok(new_total) = reserve.preview_deposit(amount) else {
            // whole instruction fails, the freshly allocated record included
            return;
        };

        match mint {
            None => {
                self.bank_tracker.vault_lamports = self
                    .bank_tracker
                    .vault_lamports
                    .checked_add(amount)
                    .expect("vault lamports cannot exceed total supply");
            }
            Some(mint) => {
                let (bank_vault, _) = bank_vault_address().unwrap();
                let bank_ata = get_associated_token_address_with_program_id(
                    &bank_vault,
                    &mint,
                    &anchor_spl::token::ID,
                );
                assert!(
                    self.bank_tracker.token_accounts.contains(&bank_ata),
                    "Invariant: vault token account exists before tokens move"
                );
                let balance = self.bank_tracker.token_vaults.entry(mint).or_insert(0);
                *balance = balance
                    .checked_add(amount)
                    .expect("vault token balance cannot exceed mint supply");
            }
        }

        reserve.commit_deposit(new_total);
        self.bank_tracker.reserves.insert(address, reserve);
    }
}

fn main() {
    // Run 1000 iterations with up to 100 flows per iteration
    FuzzTest::fuzz(1000, 100);
}
