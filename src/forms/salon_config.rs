use serde::Deserialize;
use serde_valid::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ConfigEntry {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub config_key: String,
    pub config_value: String,
}
