//! The question a processing event answers

use serde::{Deserialize, Serialize};

pub const DEFAULT_EEP: &str = "EEP_DISTRIBUTED_INTELLIGENCE";
pub const DEFAULT_SOP: &str = "SOP_BASIC_EEP_FINGERPRINTING";
pub const DEFAULT_STEP: &str = "STEP_2_SIGNATURE_SCANNING";

pub const CHARACTERIZATION: &str = "eep_characterization";

/// Which EEP to characterise, and with which SOP step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query_type: String,
    pub target_eep: String,
    pub analysis_sop: String,
    pub specific_step: String,
    pub query_text: String,
}

impl Query {
    pub fn characterize(eep_id: &str, sop_id: &str, step_id: &str) -> Self {
        Query {
            query_type: CHARACTERIZATION.to_string(),
            target_eep: eep_id.to_string(),
            analysis_sop: sop_id.to_string(),
            specific_step: step_id.to_string(),
            query_text: format!(
                "Briefly characterize {} based on {}, step {}",
                eep_id, sop_id, step_id
            ),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::characterize(DEFAULT_EEP, DEFAULT_SOP, DEFAULT_STEP)
    }
}

/// Query ids as they appear in `filament.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub target_eep: String,
    pub analysis_sop: String,
    pub specific_step: String,
}

impl QueryConfig {
    pub fn to_query(&self) -> Query {
        Query::characterize(&self.target_eep, &self.analysis_sop, &self.specific_step)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            target_eep: DEFAULT_EEP.to_string(),
            analysis_sop: DEFAULT_SOP.to_string(),
            specific_step: DEFAULT_STEP.to_string(),
        }
    }
}
