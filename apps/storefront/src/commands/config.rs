//! # Config Commands
//!
//! Store details for the header and front page.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::state::{ConfigState, StoreState};

/// What the header shows about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub address: Vec<String>,
    pub is_open: bool,
    /// e.g. `Sun 08:00-10:00`
    pub hours: String,
    /// Next opening, `dd/MM HH:MM`; `None` while open
    pub next_opening: Option<String>,
}

/// Gets the current configuration (read-only).
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Store name, opening hours and open/closed badge.
///
/// `now` is local time and only used for the next-opening label.
pub fn get_store_info(config: &ConfigState, store: &StoreState, now: NaiveDateTime) -> StoreInfo {
    debug!("get_store_info command");
    let is_open = store.is_open();

    StoreInfo {
        name: config.store_name.clone(),
        address: config.store_address.clone(),
        is_open,
        hours: config.pickup.hours_label(),
        next_opening: (!is_open).then(|| {
            config
                .pickup
                .next_opening(now)
                .format("%d/%m %H:%M")
                .to_string()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use delicia_core::AppState;

    #[test]
    fn test_store_info_when_closed() {
        let config = ConfigState::default();
        let store = StoreState::new(AppState::new(false));
        // Wednesday 2024-06-05
        let now = NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();

        let info = get_store_info(&config, &store, now);

        assert!(!info.is_open);
        assert_eq!(info.hours, "Sun 08:00-10:00");
        assert_eq!(info.next_opening.as_deref(), Some("09/06 08:00"));
    }

    #[test]
    fn test_store_info_when_open() {
        let config = ConfigState::default();
        let store = StoreState::new(AppState::new(true));
        let now = NaiveDate::from_ymd_opt(2024, 6, 9)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();

        let info = get_store_info(&config, &store, now);

        assert!(info.is_open);
        assert!(info.next_opening.is_none());
        assert_eq!(get_config(&config).store_name, info.name);
    }
}
