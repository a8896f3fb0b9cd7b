//! Profile display models

use serde::Serialize;
use tabled::Tabled;

/// Display model for profile list output
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProfileListItem {
    #[tabled(rename = "PROFILE")]
    pub name: String,

    #[tabled(rename = "ENV ID")]
    pub env_id: String,

    #[tabled(rename = "CLIENT ID")]
    pub client_id: String,

    /// "yes" when the vault holds a secret for this profile
    #[tabled(rename = "SECRET")]
    pub has_secret: String,
}
