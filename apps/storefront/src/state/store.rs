//! # Store State
//!
//! Holds the session `AppState` behind a mutex and funnels every change
//! through `AppState::dispatch`.
//!
//! ## Thread Safety
//! The state is wrapped in `Arc<Mutex<T>>` because:
//! 1. Commands and the open-status refresher touch it concurrently
//! 2. Only one change may be applied at a time
//! 3. The lock is never held across an `.await`
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► with_state_mut / dispatch ──► lock ──► AppState::dispatch  │
//! │                                                                         │
//! │  refresher (every 60s) ──► set_open ──► lock ──► Action::SetIsOpen      │
//! │                                                                         │
//! │  pay ──► begin_payment() ──► PaymentGuard (one payment at a time)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use delicia_core::schedule::PickupWindow;
use delicia_core::{Action, AppState};

use crate::error::{ApiError, ErrorCode};

/// Thread-safe session state.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    state: Arc<Mutex<AppState>>,
    payment_in_flight: Arc<AtomicBool>,
}

impl StoreState {
    pub fn new(state: AppState) -> Self {
        StoreState {
            state: Arc::new(Mutex::new(state)),
            payment_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = store.with_state(|s| s.cart_total());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.lock().expect("Store mutex poisoned");
        f(&state)
    }

    /// Executes a function with write access to the state.
    ///
    /// Prefer [`StoreState::dispatch`]; this is for changes that must apply
    /// several actions atomically.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let mut state = self.state.lock().expect("Store mutex poisoned");
        f(&mut state)
    }

    /// Applies a single action.
    ///
    /// Cart changes fail with `PAYMENT_ERROR` while a payment is in flight.
    pub fn dispatch(&self, action: Action) -> Result<(), ApiError> {
        self.with_state_mut(|state| {
            self.ensure_cart_unlocked(&action)?;
            state.dispatch(action)?;
            Ok(())
        })
    }

    /// Applies every action or none of them.
    pub fn dispatch_all(&self, actions: Vec<Action>) -> Result<(), ApiError> {
        self.with_state_mut(|state| {
            let mut draft = state.clone();
            for action in actions {
                self.ensure_cart_unlocked(&action)?;
                draft.dispatch(action)?;
            }
            *state = draft;
            Ok(())
        })
    }

    // called with the state lock held
    fn ensure_cart_unlocked(&self, action: &Action) -> Result<(), ApiError> {
        if action.changes_cart() && self.is_processing_payment() {
            warn!(action = action.name(), "Cart change refused during payment");
            return Err(ApiError::payment(
                "The cart cannot change while a payment is being processed",
            ));
        }
        Ok(())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.with_state(AppState::clone)
    }

    pub fn is_open(&self) -> bool {
        self.with_state(|s| s.is_open)
    }

    /// Recomputes the open flag for local time `now`. Returns the new value.
    pub fn refresh_open_status(&self, window: &PickupWindow, now: NaiveDateTime) -> bool {
        let open = window.is_open_at(now);
        let changed = self.with_state_mut(|state| {
            let changed = state.is_open != open;
            // SetIsOpen cannot fail
            let _ = state.dispatch(Action::SetIsOpen(open));
            changed
        });
        if changed {
            info!(open, "Store open status changed");
        }
        open
    }

    /// Marks a payment as running. Fails while another one is in flight.
    pub fn begin_payment(&self) -> Result<PaymentGuard, ApiError> {
        if self
            .payment_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ApiError::new(
                ErrorCode::PaymentError,
                "A payment is already being processed",
            ));
        }
        Ok(PaymentGuard {
            flag: Arc::clone(&self.payment_in_flight),
        })
    }

    pub fn is_processing_payment(&self) -> bool {
        self.payment_in_flight.load(Ordering::Acquire)
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
pub struct PaymentGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for PaymentGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Rechecks the opening window on a fixed period using the local clock.
///
/// The first check runs immediately. Abort the handle to stop it.
pub fn spawn_open_status_refresh(
    store: StoreState,
    window: PickupWindow,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let open = store.refresh_open_status(&window, Local::now().naive_local());
            debug!(open, "Open status rechecked");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use delicia_core::catalog;

    fn sunday_at(hour: u32) -> NaiveDateTime {
        // 2024-06-09 is a Sunday
        NaiveDate::from_ymd_opt(2024, 6, 9)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn add(product_id: &str, quantity: i64) -> Action {
        Action::AddToCart {
            product: catalog::get(product_id).unwrap().clone(),
            quantity,
        }
    }

    #[test]
    fn test_dispatch_updates_state() {
        let store = StoreState::default();
        store.dispatch(add("picanha", 2)).unwrap();

        assert_eq!(store.with_state(|s| s.cart_item_count()), 2);
        assert_eq!(store.snapshot().cart.line_count(), 1);
    }

    #[test]
    fn test_dispatch_all_is_atomic() {
        let store = StoreState::default();
        store.dispatch(add("picanha", 1)).unwrap();

        let result = store.dispatch_all(vec![
            add("maminha", 1),
            add("picanha", 0), // invalid quantity
        ]);

        assert!(result.is_err());
        let state = store.snapshot();
        assert_eq!(state.cart.line_count(), 1);
        assert!(!state.cart.contains_product("maminha"));
    }

    #[test]
    fn test_refresh_open_status() {
        let store = StoreState::default();
        let window = PickupWindow::default();

        assert!(store.refresh_open_status(&window, sunday_at(8)));
        assert!(store.is_open());

        assert!(!store.refresh_open_status(&window, sunday_at(10)));
        assert!(!store.is_open());
    }

    #[test]
    fn test_payment_guard() {
        let store = StoreState::default();

        let guard = store.begin_payment().unwrap();
        assert!(store.is_processing_payment());
        assert!(store.begin_payment().is_err());

        drop(guard);
        assert!(!store.is_processing_payment());
        assert!(store.begin_payment().is_ok());
    }

    #[test]
    fn test_cart_locked_during_payment() {
        let store = StoreState::default();
        store.dispatch(add("picanha", 1)).unwrap();

        let guard = store.begin_payment().unwrap();
        let err = store.dispatch(add("maminha", 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(store.dispatch(Action::ClearCart).is_err());
        assert!(store.dispatch_all(vec![add("picanha", 1)]).is_err());
        // other actions still go through
        store.dispatch(Action::SetIsOpen(false)).unwrap();
        assert_eq!(store.with_state(|s| s.cart_item_count()), 1);

        drop(guard);
        store.dispatch(add("maminha", 1)).unwrap();
        assert_eq!(store.with_state(|s| s.cart.line_count()), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_task_runs_immediately() {
        let store = StoreState::default();
        let handle = spawn_open_status_refresh(
            store.clone(),
            PickupWindow::default(),
            Duration::from_secs(60),
        );

        tokio::time::sleep(Duration::from_millis(1)).await;
        let expected = PickupWindow::default().is_open_at(Local::now().naive_local());
        assert_eq!(store.is_open(), expected);

        handle.abort();
    }
}
