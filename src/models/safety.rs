use serde::{Deserialize, Serialize};

/// Risk classification returned by the drug-safety analysis.
///
/// The backend's scoring emits `HIGH` / `LOW`; older deployments used
/// `SAFE` for the green path. Anything unrecognized lands in `Unknown`
/// and is rendered as the safe banner without alert rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Low,
    Safe,
    #[serde(other)]
    Unknown,
}

/// One conflicting drug pair with the pharmacological explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugConflict {
    #[serde(default)]
    pub drug_a: String,
    #[serde(default)]
    pub drug_b: String,
    #[serde(default)]
    pub reason: String,
}

/// Outcome of a prescription-safety check, displayed as the safety banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyResult {
    pub risk: RiskLevel,
    #[serde(default)]
    pub alerts: Vec<DrugConflict>,
}

impl SafetyResult {
    pub fn is_high(&self) -> bool {
        self.risk == RiskLevel::High
    }

    /// Conflict rows to render. Alerts are meaningful only on a HIGH
    /// classification; any stray entries on a safe result are suppressed.
    pub fn rendered_alerts(&self) -> &[DrugConflict] {
        if self.is_high() {
            &self.alerts
        } else {
            &[]
        }
    }
}
