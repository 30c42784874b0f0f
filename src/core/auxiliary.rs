//! Domain payload carried next to the automaton state.
//!
//! The automaton only knows states and symbols. What a symbol does to the
//! device (credit a coin, record a chosen drink, charge for a brew) is an
//! [`AuxEffect`] bound to that symbol by the device profile. Effects are
//! prepared as pure functions of the current [`Auxiliary`], so a failing
//! preparation leaves nothing half-applied.

use super::state::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Auxiliary engine payload: selected item and accrued balance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auxiliary {
    /// Item recorded by the last selection, cleared on collection
    pub selected_item: Option<String>,
    /// Credit inserted and not yet charged or refunded
    pub balance: u64,
}

/// A purchasable item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: u64,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Items a device offers, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn price(&self, id: &str) -> Option<u64> {
        self.get(id).map(|item| item.price)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Extra input supplied with a symbol.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::Params;
///
/// let coin = Params::coin(10);
/// assert_eq!(coin.amount, Some(10));
///
/// let choice = Params::item("latte");
/// assert_eq!(choice.item.as_deref(), Some("latte"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub item: Option<String>,
    pub amount: Option<u64>,
}

impl Params {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn item(id: impl Into<String>) -> Self {
        Self {
            item: Some(id.into()),
            amount: None,
        }
    }

    pub fn coin(amount: u64) -> Self {
        Self {
            item: None,
            amount: Some(amount),
        }
    }
}

/// Reasons an effect cannot be prepared from the given input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please select an item first")]
    MissingItem,

    #[error("Unknown item '{0}'")]
    UnknownItem(String),

    #[error("Coin value required")]
    MissingAmount,

    #[error("Coin value must be positive")]
    ZeroAmount,

    #[error("Nothing selected to charge for")]
    NothingSelected,

    #[error("Balance {balance} does not cover price {price}")]
    InsufficientBalance { balance: u64, price: u64 },

    #[error("Balance overflow")]
    Overflow,
}

/// Mutation of [`Auxiliary`] associated with a symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuxEffect {
    /// No change
    #[default]
    None,
    /// Add `params.amount` to the balance
    Credit,
    /// Record `params.item` as the selected item, keeping the current
    /// selection when no item is given
    RecordSelection,
    /// Debit the price of the selected item
    Charge,
    /// Forget the selected item; balance is kept as credit
    ClearSelection,
    /// Return the whole balance
    Refund,
}

/// Result of preparing an effect: the auxiliary to commit and the amount
/// debited by it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prepared {
    pub auxiliary: Auxiliary,
    pub charged: u64,
}

impl AuxEffect {
    /// Compute the new auxiliary without touching the current one.
    pub fn prepare(
        self,
        current: &Auxiliary,
        params: &Params,
        catalog: &Catalog,
    ) -> Result<Prepared, InputError> {
        let mut next = current.clone();
        let mut charged = 0;

        match self {
            AuxEffect::None => {}
            AuxEffect::Credit => {
                let amount = params.amount.ok_or(InputError::MissingAmount)?;
                if amount == 0 {
                    return Err(InputError::ZeroAmount);
                }
                next.balance = next
                    .balance
                    .checked_add(amount)
                    .ok_or(InputError::Overflow)?;
            }
            AuxEffect::RecordSelection => {
                let item = params
                    .item
                    .as_ref()
                    .or(current.selected_item.as_ref())
                    .ok_or(InputError::MissingItem)?;
                if catalog.get(item).is_none() {
                    return Err(InputError::UnknownItem(item.clone()));
                }
                next.selected_item = Some(item.clone());
            }
            AuxEffect::Charge => {
                let item = current
                    .selected_item
                    .as_deref()
                    .ok_or(InputError::NothingSelected)?;
                let price = catalog
                    .price(item)
                    .ok_or_else(|| InputError::UnknownItem(item.to_string()))?;
                next.balance = current
                    .balance
                    .checked_sub(price)
                    .ok_or(InputError::InsufficientBalance {
                        balance: current.balance,
                        price,
                    })?;
                charged = price;
            }
            AuxEffect::ClearSelection => {
                next.selected_item = None;
            }
            AuxEffect::Refund => {
                next.balance = 0;
            }
        }

        Ok(Prepared {
            auxiliary: next,
            charged,
        })
    }
}

/// Symbol → effect bindings for one device. Unbound symbols have no effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectTable {
    effects: BTreeMap<Symbol, AuxEffect>,
}

impl EffectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, symbol: impl Into<String>, effect: AuxEffect) -> Self {
        self.effects.insert(Symbol::new(symbol), effect);
        self
    }

    pub fn effect_for(&self, symbol: &Symbol) -> AuxEffect {
        self.effects.get(symbol).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Item::new("espresso", "Espresso", 15),
            Item::new("latte", "Café Latte", 25),
        ])
    }

    #[test]
    fn credit_adds_coin_value() {
        let aux = Auxiliary::default();
        let prepared = AuxEffect::Credit
            .prepare(&aux, &Params::coin(10), &catalog())
            .unwrap();
        assert_eq!(prepared.auxiliary.balance, 10);
        assert_eq!(prepared.charged, 0);
    }

    #[test]
    fn credit_requires_positive_amount() {
        let aux = Auxiliary::default();
        assert_eq!(
            AuxEffect::Credit.prepare(&aux, &Params::none(), &catalog()),
            Err(InputError::MissingAmount)
        );
        assert_eq!(
            AuxEffect::Credit.prepare(&aux, &Params::coin(0), &catalog()),
            Err(InputError::ZeroAmount)
        );
    }

    #[test]
    fn credit_detects_overflow() {
        let aux = Auxiliary {
            selected_item: None,
            balance: u64::MAX,
        };
        assert_eq!(
            AuxEffect::Credit.prepare(&aux, &Params::coin(1), &catalog()),
            Err(InputError::Overflow)
        );
    }

    #[test]
    fn record_selection_validates_item() {
        let aux = Auxiliary::default();
        assert_eq!(
            AuxEffect::RecordSelection.prepare(&aux, &Params::none(), &catalog()),
            Err(InputError::MissingItem)
        );
        assert_eq!(
            AuxEffect::RecordSelection.prepare(&aux, &Params::item("tea"), &catalog()),
            Err(InputError::UnknownItem("tea".to_string()))
        );

        let prepared = AuxEffect::RecordSelection
            .prepare(&aux, &Params::item("latte"), &catalog())
            .unwrap();
        assert_eq!(prepared.auxiliary.selected_item.as_deref(), Some("latte"));
    }

    #[test]
    fn record_selection_keeps_current_item_without_params() {
        let aux = Auxiliary {
            selected_item: Some("espresso".to_string()),
            balance: 20,
        };
        let prepared = AuxEffect::RecordSelection
            .prepare(&aux, &Params::none(), &catalog())
            .unwrap();
        assert_eq!(prepared.auxiliary, aux);
        assert_eq!(prepared.charged, 0);
    }

    #[test]
    fn charge_debits_selected_price() {
        let aux = Auxiliary {
            selected_item: Some("latte".to_string()),
            balance: 30,
        };
        let prepared = AuxEffect::Charge
            .prepare(&aux, &Params::none(), &catalog())
            .unwrap();
        assert_eq!(prepared.auxiliary.balance, 5);
        assert_eq!(prepared.charged, 25);
        assert_eq!(prepared.auxiliary.selected_item.as_deref(), Some("latte"));
    }

    #[test]
    fn charge_never_goes_negative() {
        let aux = Auxiliary {
            selected_item: Some("latte".to_string()),
            balance: 10,
        };
        assert_eq!(
            AuxEffect::Charge.prepare(&aux, &Params::none(), &catalog()),
            Err(InputError::InsufficientBalance {
                balance: 10,
                price: 25
            })
        );
    }

    #[test]
    fn clear_and_refund() {
        let aux = Auxiliary {
            selected_item: Some("espresso".to_string()),
            balance: 7,
        };
        let cleared = AuxEffect::ClearSelection
            .prepare(&aux, &Params::none(), &catalog())
            .unwrap();
        assert_eq!(cleared.auxiliary.selected_item, None);
        assert_eq!(cleared.auxiliary.balance, 7);

        let refunded = AuxEffect::Refund
            .prepare(&aux, &Params::none(), &catalog())
            .unwrap();
        assert_eq!(refunded.auxiliary.balance, 0);
        assert_eq!(refunded.charged, 0);
    }

    #[test]
    fn unbound_symbols_have_no_effect() {
        let table = EffectTable::new().bind("INSERT_COIN", AuxEffect::Credit);
        assert_eq!(table.effect_for(&Symbol::new("INSERT_COIN")), AuxEffect::Credit);
        assert_eq!(table.effect_for(&Symbol::new("START")), AuxEffect::None);
    }

    #[test]
    fn auxiliary_serializes_camel_case() {
        let aux = Auxiliary {
            selected_item: Some("latte".to_string()),
            balance: 5,
        };
        let json = serde_json::to_value(&aux).unwrap();
        assert_eq!(json["selectedItem"], "latte");
        assert_eq!(json["balance"], 5);
    }
}
