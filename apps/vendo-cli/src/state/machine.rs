//! # Machine State
//!
//! The one vending machine this terminal drives.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so a purchase (validate, merge
//! coins, pay change, decrement stock) runs under a single lock. Two
//! customers can never draw on the same reserve coins.

use std::sync::{Arc, Mutex};

use vendo_core::VendingSession;

/// Shared handle to the vending session.
#[derive(Debug, Clone)]
pub struct MachineState {
    machine: Arc<Mutex<VendingSession>>,
}

impl MachineState {
    pub fn new(session: VendingSession) -> Self {
        MachineState {
            machine: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.with_machine(|m| m.inserted_total());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingSession) -> R,
    {
        let machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let sale = state.with_machine_mut(|m| m.purchase("A01"))?;
    /// ```
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingSession) -> R,
    {
        let mut machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&mut machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::thread;
    use vendo_core::{Item, Money};

    fn state() -> MachineState {
        let session = VendingSession::new(
            vec![Item::new("A01", "Cola", 100, 50)],
            [(50u32, 0), (10, 20)],
        )
        .unwrap();
        MachineState::new(session)
    }

    #[test]
    fn test_clones_share_one_machine() {
        let state = state();
        let other = state.clone();

        other.with_machine_mut(|m| m.insert_coin(50)).unwrap();

        assert_eq!(state.with_machine(|m| m.inserted_total()), Money::from_pence(50));
    }

    #[test]
    fn test_concurrent_purchases_do_not_overdraw_reserve() {
        let state = state();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    state.with_machine_mut(|m| {
                        m.insert_coin(100).unwrap();
                        m.purchase("A01").unwrap()
                    })
                })
            })
            .collect();

        let sales: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // 20 x 10p covers exactly four 50p change payouts
        let exact = sales.iter().filter(|s| s.shortfall().is_zero()).count();
        assert_eq!(sales.len(), 8);
        assert_eq!(exact, 4);
        state.with_machine(|m| {
            assert_eq!(m.item("A01").unwrap().quantity, 92);
            assert_eq!(m.reserve().to_map(), BTreeMap::from([(100, 8)]));
        });
    }
}
