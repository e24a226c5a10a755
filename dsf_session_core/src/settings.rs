use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionResult;

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Address of the deployed scholarship contract.
    pub contract_address: String,
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Upper bound on the confirmation wait, in seconds. Absent means
    /// wait indefinitely, matching the network's own pacing.
    #[serde(default)]
    pub confirm_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn from_file(path: &str) -> SessionResult<Self> {
        let builder = config::Config::builder().add_source(config::File::with_name(path));
        let cfg = builder.build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn save_to_file(&self, path: &str) -> SessionResult<()> {
        let toml_string = toml::to_string(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    pub fn confirm_timeout(&self) -> Option<Duration> {
        self.confirm_timeout_secs.map(Duration::from_secs)
    }
}
