//! Device profiles: everything that distinguishes one dispenser from
//! another.
//!
//! A profile bundles the automaton, the guard policy, the effect each
//! symbol has on the auxiliary payload, and the catalog of items. The
//! engine itself is the same for every device.

use crate::builder::{AutomatonBuilder, BuildError};
use crate::core::{
    AlwaysApprove, AuxEffect, Automaton, BalanceGuard, Catalog, EffectTable, GuardPolicy, Item,
};

/// State identifiers shared by the bundled devices.
pub mod states {
    pub const IDLE: &str = "q0";
    pub const SELECTING: &str = "q1";
    pub const BREWING: &str = "q2";
    pub const READY: &str = "q3";
    pub const CLEAN: &str = "q4";
}

/// Input symbols of the bundled devices.
pub mod symbols {
    pub const START: &str = "START";
    pub const SELECT: &str = "SELECT";
    pub const BREW: &str = "BREW";
    pub const COLLECT: &str = "COLLECT";
    pub const MAINTENANCE: &str = "MAINTENANCE";
    pub const INSERT_COIN: &str = "INSERT_COIN";
    pub const REFUND: &str = "REFUND";
}

use states::*;
use symbols::*;

/// Static configuration of a device.
#[derive(Debug)]
pub struct DeviceProfile {
    name: String,
    automaton: Automaton,
    guard: Box<dyn GuardPolicy>,
    effects: EffectTable,
    catalog: Catalog,
}

impl DeviceProfile {
    pub fn new(
        name: impl Into<String>,
        automaton: Automaton,
        guard: impl GuardPolicy + 'static,
        effects: EffectTable,
        catalog: Catalog,
    ) -> Self {
        Self {
            name: name.into(),
            automaton,
            guard: Box::new(guard),
            effects,
            catalog,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn guard(&self) -> &dyn GuardPolicy {
        self.guard.as_ref()
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn coffee_states() -> AutomatonBuilder {
    AutomatonBuilder::new()
        .state(IDLE, "IDLE", "Ready to start coffee selection")
        .state(SELECTING, "SELECTING", "Choose your coffee type")
        .state(BREWING, "BREWING", "Brewing in progress...")
        .state(READY, "READY", "Coffee is ready! Accepting state")
        .state(CLEAN, "CLEAN", "Maintenance mode active")
        .start(IDLE)
        .accepting(READY)
}

/// Free-standing brewer: no payment, the selection is recorded and
/// cleared on collection.
pub fn brewer() -> Result<DeviceProfile, BuildError> {
    let automaton = coffee_states()
        .symbols([START, SELECT, BREW, COLLECT, MAINTENANCE])
        .transition(IDLE, START, SELECTING)
        .transition(SELECTING, SELECT, BREWING)
        .transition(BREWING, BREW, READY)
        .transition(BREWING, MAINTENANCE, CLEAN)
        .transition(READY, COLLECT, IDLE)
        .transition(READY, MAINTENANCE, CLEAN)
        .transition(CLEAN, COLLECT, IDLE)
        .build()?;

    let effects = EffectTable::new()
        .bind(SELECT, AuxEffect::RecordSelection)
        .bind(COLLECT, AuxEffect::ClearSelection);

    let catalog = Catalog::new(vec![
        Item::new("espresso", "Espresso", 0),
        Item::new("latte", "Café Latte", 0),
        Item::new("cappuccino", "Cappuccino", 0),
        Item::new("mocha", "Mocha", 0),
    ]);

    Ok(DeviceProfile::new("brewer", automaton, AlwaysApprove, effects, catalog))
}

/// Coin-operated vendor: coins build a balance, selection requires enough
/// balance, brewing charges the price.
pub fn vendor() -> Result<DeviceProfile, BuildError> {
    let automaton = coffee_states()
        .symbols([INSERT_COIN, SELECT, BREW, COLLECT, REFUND, MAINTENANCE])
        .transition(IDLE, INSERT_COIN, SELECTING)
        .transition(SELECTING, INSERT_COIN, SELECTING)
        .transition(SELECTING, SELECT, BREWING)
        .transition(SELECTING, REFUND, IDLE)
        .transition(BREWING, BREW, READY)
        .transition(BREWING, MAINTENANCE, CLEAN)
        .transition(READY, COLLECT, IDLE)
        .transition(READY, MAINTENANCE, CLEAN)
        .transition(CLEAN, COLLECT, IDLE)
        .build()?;

    let effects = EffectTable::new()
        .bind(INSERT_COIN, AuxEffect::Credit)
        .bind(SELECT, AuxEffect::RecordSelection)
        .bind(BREW, AuxEffect::Charge)
        .bind(COLLECT, AuxEffect::ClearSelection)
        .bind(REFUND, AuxEffect::Refund);

    let catalog = Catalog::new(vec![
        Item::new("espresso", "Espresso", 15),
        Item::new("latte", "Café Latte", 25),
        Item::new("cappuccino", "Cappuccino", 25),
        Item::new("mocha", "Mocha", 30),
    ]);
    let guard = BalanceGuard::new([SELECT], catalog.clone());

    Ok(DeviceProfile::new("vendor", automaton, guard, effects, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateId, Symbol};

    fn lookup(automaton: &Automaton, from: &str, symbol: &str) -> Option<String> {
        automaton
            .lookup(&StateId::new(from), &Symbol::new(symbol))
            .map(|to| to.to_string())
    }

    #[test]
    fn brewer_matches_coffee_table() {
        let profile = brewer().unwrap();
        let automaton = profile.automaton();

        assert_eq!(profile.name(), "brewer");
        assert_eq!(automaton.start(), &StateId::new(IDLE));
        assert_eq!(lookup(automaton, IDLE, START).as_deref(), Some(SELECTING));
        assert_eq!(lookup(automaton, SELECTING, SELECT).as_deref(), Some(BREWING));
        assert_eq!(lookup(automaton, BREWING, BREW).as_deref(), Some(READY));
        assert_eq!(lookup(automaton, READY, COLLECT).as_deref(), Some(IDLE));
        assert_eq!(lookup(automaton, CLEAN, COLLECT).as_deref(), Some(IDLE));
        assert_eq!(lookup(automaton, SELECTING, BREW), None);
        assert!(automaton.is_accepting(&StateId::new(READY)));
        assert_eq!(automaton.table().len(), 7);
    }

    #[test]
    fn vendor_loops_on_coins() {
        let profile = vendor().unwrap();
        let automaton = profile.automaton();

        assert_eq!(lookup(automaton, IDLE, INSERT_COIN).as_deref(), Some(SELECTING));
        assert_eq!(lookup(automaton, SELECTING, INSERT_COIN).as_deref(), Some(SELECTING));
        assert_eq!(lookup(automaton, SELECTING, REFUND).as_deref(), Some(IDLE));
        assert_eq!(lookup(automaton, IDLE, START), None);
        assert_eq!(
            profile.effects().effect_for(&Symbol::new(BREW)),
            AuxEffect::Charge
        );
        assert_eq!(profile.catalog().price("latte"), Some(25));
    }
}
