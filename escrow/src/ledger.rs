//! The escrow ledger. Holds deposits and releases each exactly once.

use crate::account::{Disposition, EscrowAccount, EscrowKey, Settlement};

use franchise_types::{ActorId, Amount, EscrowError};
use std::collections::{BTreeMap, BTreeSet};

/// Ledger of held deposits plus running totals.
#[derive(Debug, Default)]
pub struct EscrowLedger {
    accounts: BTreeMap<EscrowKey, EscrowAccount>,
    total_held: Amount,
    /// Forfeited funds kept by the commission.
    treasury: Amount,
    total_refunded: Amount,
}

impl EscrowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `amount` for `owner` under `key`.
    ///
    /// Fails without side effects if the key is already held or the ledger
    /// total would overflow.
    pub fn hold(
        &mut self,
        key: EscrowKey,
        owner: ActorId,
        amount: Amount,
    ) -> Result<(), EscrowError> {
        if self.accounts.contains_key(&key) {
            return Err(EscrowError::AlreadyHeld(key));
        }
        let total_held = self
            .total_held
            .checked_add(amount)
            .ok_or(EscrowError::Overflow { amount })?;
        tracing::debug!(key, owner = %owner, %amount, "escrow held");
        self.accounts.insert(key, EscrowAccount { key, owner, amount });
        self.total_held = total_held;
        Ok(())
    }

    /// Release the account under `key` with the given disposition.
    pub fn release(
        &mut self,
        key: EscrowKey,
        disposition: Disposition,
    ) -> Result<Settlement, EscrowError> {
        let amount = self
            .accounts
            .get(&key)
            .map(|account| account.amount)
            .ok_or(EscrowError::NotHeld(key))?;
        let (treasury, total_refunded) = match disposition {
            Disposition::Refund => (
                self.treasury,
                self.total_refunded
                    .checked_add(amount)
                    .ok_or(EscrowError::Overflow { amount })?,
            ),
            Disposition::Forfeit => (
                self.treasury
                    .checked_add(amount)
                    .ok_or(EscrowError::Overflow { amount })?,
                self.total_refunded,
            ),
        };

        let account = self.accounts.remove(&key).ok_or(EscrowError::NotHeld(key))?;
        // Held totals are the sum of live accounts, so this cannot underflow.
        self.total_held = self.total_held.saturating_sub(amount);
        self.treasury = treasury;
        self.total_refunded = total_refunded;

        match disposition {
            Disposition::Refund => {
                tracing::info!(key, owner = %account.owner, %amount, "escrow refunded")
            }
            Disposition::Forfeit => {
                tracing::warn!(key, owner = %account.owner, %amount, "escrow forfeited")
            }
        }

        Ok(Settlement {
            key,
            owner: account.owner,
            amount,
            disposition,
        })
    }

    /// Release every account in `plan`, or none of them.
    ///
    /// The whole plan is checked first: each key must be held and appear
    /// once, and the refund and treasury totals must not overflow.
    pub fn release_all(
        &mut self,
        plan: &[(EscrowKey, Disposition)],
    ) -> Result<Vec<Settlement>, EscrowError> {
        let mut seen = BTreeSet::new();
        let mut treasury = self.treasury;
        let mut total_refunded = self.total_refunded;
        for &(key, disposition) in plan {
            let amount = self
                .accounts
                .get(&key)
                .filter(|_| seen.insert(key))
                .map(|account| account.amount)
                .ok_or(EscrowError::NotHeld(key))?;
            match disposition {
                Disposition::Refund => {
                    total_refunded = total_refunded
                        .checked_add(amount)
                        .ok_or(EscrowError::Overflow { amount })?
                }
                Disposition::Forfeit => {
                    treasury = treasury
                        .checked_add(amount)
                        .ok_or(EscrowError::Overflow { amount })?
                }
            }
        }

        plan.iter()
            .map(|&(key, disposition)| self.release(key, disposition))
            .collect()
    }

    pub fn account(&self, key: EscrowKey) -> Option<&EscrowAccount> {
        self.accounts.get(&key)
    }

    /// Amount currently held under `key` (zero if none).
    pub fn held(&self, key: EscrowKey) -> Amount {
        self.accounts
            .get(&key)
            .map(|account| account.amount)
            .unwrap_or(Amount::ZERO)
    }

    pub fn is_held(&self, key: EscrowKey) -> bool {
        self.accounts.contains_key(&key)
    }

    pub fn total_held(&self) -> Amount {
        self.total_held
    }

    pub fn treasury(&self) -> Amount {
        self.treasury
    }

    pub fn total_refunded(&self) -> Amount {
        self.total_refunded
    }

    pub fn open_accounts(&self) -> usize {
        self.accounts.len()
    }
}
