//! # Config Commands
//!
//! Display settings the browser needs before rendering anything.

use serde::{Deserialize, Serialize};
use tracing::debug;

use knitcraft_core::Category;

use crate::state::ConfigState;

/// Store display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub store_name: String,
    pub currency_symbol: String,
    /// Width in pixels for product images.
    pub image_display_width: u32,
    /// Labels offered by the add form's category picker.
    pub categories: Vec<String>,
    pub max_image_bytes: usize,
}

/// Gets the current display configuration.
///
/// ## When Used
/// - Page load (store title, currency formatting)
/// - Building the add form (category picker, upload size hint)
pub fn get_config(config: &ConfigState) -> ConfigDto {
    debug!("get_config command");

    let store = config.store();
    ConfigDto {
        store_name: store.store_name.clone(),
        currency_symbol: store.currency_symbol.clone(),
        image_display_width: store.image_display_width,
        categories: Category::labels(),
        max_image_bytes: config.max_image_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_config_reports_store_defaults() {
        let dto = get_config(&ConfigState::new(AppConfig::for_tests()));

        assert_eq!(dto.store_name, "KnitCraft Store");
        assert_eq!(dto.currency_symbol, "₹");
        assert_eq!(dto.image_display_width, 200);
        assert_eq!(
            dto.categories,
            vec!["Scarf", "Sweater", "Toy", "Accessory", "Other"]
        );
    }
}
