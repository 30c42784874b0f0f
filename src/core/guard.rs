//! Guard policies for controlling transitions.
//!
//! A guard is a pure precondition checked after the table has accepted a
//! `(state, symbol)` pair and before anything is committed. Guards see the
//! auxiliary payload by shared reference only; mutation happens in the
//! engine after approval.

use super::auxiliary::{Auxiliary, Catalog, Params};
use super::state::Symbol;
use std::collections::BTreeSet;
use std::fmt::Debug;
use thiserror::Error;

/// Why a guard denied a transition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("InsufficientFunds: balance {balance} is below price {price}")]
    InsufficientFunds { balance: u64, price: u64 },

    #[error("NoItemSelected: choose an item before selecting")]
    NoItemSelected,

    #[error("UnknownItem: '{0}' is not on the menu")]
    UnknownItem(String),
}

/// Outcome of evaluating a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Approved,
    Denied(DenialReason),
}

impl GuardDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, GuardDecision::Approved)
    }
}

/// Pure precondition evaluated before a transition commits.
///
/// Implementations must be deterministic: the same symbol, parameters and
/// auxiliary always produce the same decision.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::{AlwaysApprove, Auxiliary, GuardPolicy, Params, Symbol};
///
/// let guard = AlwaysApprove;
/// let decision = guard.evaluate(&Symbol::new("BREW"), &Params::none(), &Auxiliary::default());
/// assert!(decision.is_approved());
/// ```
pub trait GuardPolicy: Debug + Send + Sync {
    fn evaluate(&self, symbol: &Symbol, params: &Params, auxiliary: &Auxiliary) -> GuardDecision;
}

/// Guard for devices without preconditions.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysApprove;

impl GuardPolicy for AlwaysApprove {
    fn evaluate(&self, _symbol: &Symbol, _params: &Params, _auxiliary: &Auxiliary) -> GuardDecision {
        GuardDecision::Approved
    }
}

/// Requires enough balance to pay for the chosen item on select-class
/// symbols. Every other symbol is approved.
///
/// The chosen item is the one passed with the symbol, or else the one
/// already recorded in the auxiliary payload.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::{
///     Auxiliary, BalanceGuard, Catalog, DenialReason, GuardDecision, GuardPolicy, Item, Params,
///     Symbol,
/// };
///
/// let catalog = Catalog::new(vec![Item::new("latte", "Café Latte", 25)]);
/// let guard = BalanceGuard::new(["SELECT"], catalog);
/// let select = Symbol::new("SELECT");
///
/// let poor = Auxiliary { selected_item: None, balance: 10 };
/// assert_eq!(
///     guard.evaluate(&select, &Params::item("latte"), &poor),
///     GuardDecision::Denied(DenialReason::InsufficientFunds { balance: 10, price: 25 })
/// );
///
/// let rich = Auxiliary { selected_item: None, balance: 30 };
/// assert!(guard.evaluate(&select, &Params::item("latte"), &rich).is_approved());
/// ```
#[derive(Clone, Debug)]
pub struct BalanceGuard {
    select_symbols: BTreeSet<Symbol>,
    catalog: Catalog,
}

impl BalanceGuard {
    pub fn new<I, S>(select_symbols: I, catalog: Catalog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            select_symbols: select_symbols.into_iter().map(Symbol::new).collect(),
            catalog,
        }
    }

    pub fn guards(&self, symbol: &Symbol) -> bool {
        self.select_symbols.contains(symbol)
    }
}

impl GuardPolicy for BalanceGuard {
    fn evaluate(&self, symbol: &Symbol, params: &Params, auxiliary: &Auxiliary) -> GuardDecision {
        if !self.guards(symbol) {
            return GuardDecision::Approved;
        }

        let Some(item) = params.item.as_ref().or(auxiliary.selected_item.as_ref()) else {
            return GuardDecision::Denied(DenialReason::NoItemSelected);
        };

        match self.catalog.price(item) {
            None => GuardDecision::Denied(DenialReason::UnknownItem(item.clone())),
            Some(price) if auxiliary.balance < price => {
                GuardDecision::Denied(DenialReason::InsufficientFunds {
                    balance: auxiliary.balance,
                    price,
                })
            }
            Some(_) => GuardDecision::Approved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Item;

    fn guard() -> BalanceGuard {
        BalanceGuard::new(
            ["SELECT"],
            Catalog::new(vec![
                Item::new("espresso", "Espresso", 15),
                Item::new("latte", "Café Latte", 25),
            ]),
        )
    }

    fn aux(balance: u64) -> Auxiliary {
        Auxiliary {
            selected_item: None,
            balance,
        }
    }

    #[test]
    fn always_approve_approves_everything() {
        let guard = AlwaysApprove;
        for symbol in ["START", "SELECT", "BREW", "COLLECT"] {
            assert!(guard
                .evaluate(&Symbol::new(symbol), &Params::none(), &aux(0))
                .is_approved());
        }
    }

    #[test]
    fn balance_guard_ignores_other_symbols() {
        let guard = guard();
        assert!(guard
            .evaluate(&Symbol::new("INSERT_COIN"), &Params::coin(5), &aux(0))
            .is_approved());
        assert!(guard
            .evaluate(&Symbol::new("BREW"), &Params::none(), &aux(0))
            .is_approved());
    }

    #[test]
    fn balance_guard_denies_insufficient_funds() {
        let decision = guard().evaluate(&Symbol::new("SELECT"), &Params::item("latte"), &aux(24));
        assert_eq!(
            decision,
            GuardDecision::Denied(DenialReason::InsufficientFunds {
                balance: 24,
                price: 25
            })
        );
    }

    #[test]
    fn balance_guard_approves_exact_price() {
        assert!(guard()
            .evaluate(&Symbol::new("SELECT"), &Params::item("latte"), &aux(25))
            .is_approved());
    }

    #[test]
    fn balance_guard_falls_back_to_recorded_item() {
        let recorded = Auxiliary {
            selected_item: Some("espresso".to_string()),
            balance: 15,
        };
        assert!(guard()
            .evaluate(&Symbol::new("SELECT"), &Params::none(), &recorded)
            .is_approved());
    }

    #[test]
    fn balance_guard_requires_known_item() {
        let guard = guard();
        assert_eq!(
            guard.evaluate(&Symbol::new("SELECT"), &Params::none(), &aux(100)),
            GuardDecision::Denied(DenialReason::NoItemSelected)
        );
        assert_eq!(
            guard.evaluate(&Symbol::new("SELECT"), &Params::item("tea"), &aux(100)),
            GuardDecision::Denied(DenialReason::UnknownItem("tea".to_string()))
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = guard();
        let state = aux(20);
        let first = guard.evaluate(&Symbol::new("SELECT"), &Params::item("latte"), &state);
        let second = guard.evaluate(&Symbol::new("SELECT"), &Params::item("latte"), &state);
        assert_eq!(first, second);
        assert_eq!(state, aux(20));
    }

    #[test]
    fn denial_reason_names_insufficient_funds() {
        let reason = DenialReason::InsufficientFunds {
            balance: 10,
            price: 25,
        };
        assert!(reason.to_string().starts_with("InsufficientFunds"));
    }
}
