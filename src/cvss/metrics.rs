use serde::{Deserialize, Serialize};

use crate::errors::WstgkitError;

/// AV — how the vulnerability is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackVector {
    #[serde(rename = "N")]
    Network,
    #[serde(rename = "A")]
    Adjacent,
    #[serde(rename = "L")]
    Local,
    #[serde(rename = "P")]
    Physical,
}

impl AttackVector {
    pub fn weight(&self) -> f64 {
        match self {
            AttackVector::Network => 0.85,
            AttackVector::Adjacent => 0.62,
            AttackVector::Local => 0.55,
            AttackVector::Physical => 0.20,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AttackVector::Network => "N",
            AttackVector::Adjacent => "A",
            AttackVector::Local => "L",
            AttackVector::Physical => "P",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(AttackVector::Network),
            "A" => Some(AttackVector::Adjacent),
            "L" => Some(AttackVector::Local),
            "P" => Some(AttackVector::Physical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackComplexity {
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "H")]
    High,
}

impl AttackComplexity {
    pub fn weight(&self) -> f64 {
        match self {
            AttackComplexity::Low => 0.77,
            AttackComplexity::High => 0.44,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AttackComplexity::Low => "L",
            AttackComplexity::High => "H",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(AttackComplexity::Low),
            "H" => Some(AttackComplexity::High),
            _ => None,
        }
    }
}

/// PR weight depends on Scope: a changed scope rewards low/high privileges
/// with slightly larger weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegesRequired {
    #[serde(rename = "N")]
    None,
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "H")]
    High,
}

impl PrivilegesRequired {
    pub fn weight(&self, scope: Scope) -> f64 {
        match (self, scope) {
            (PrivilegesRequired::None, _) => 0.85,
            (PrivilegesRequired::Low, Scope::Unchanged) => 0.62,
            (PrivilegesRequired::Low, Scope::Changed) => 0.68,
            (PrivilegesRequired::High, Scope::Unchanged) => 0.27,
            (PrivilegesRequired::High, Scope::Changed) => 0.50,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PrivilegesRequired::None => "N",
            PrivilegesRequired::Low => "L",
            PrivilegesRequired::High => "H",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(PrivilegesRequired::None),
            "L" => Some(PrivilegesRequired::Low),
            "H" => Some(PrivilegesRequired::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserInteraction {
    #[serde(rename = "N")]
    None,
    #[serde(rename = "R")]
    Required,
}

impl UserInteraction {
    pub fn weight(&self) -> f64 {
        match self {
            UserInteraction::None => 0.85,
            UserInteraction::Required => 0.62,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            UserInteraction::None => "N",
            UserInteraction::Required => "R",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(UserInteraction::None),
            "R" => Some(UserInteraction::Required),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "U")]
    Unchanged,
    #[serde(rename = "C")]
    Changed,
}

impl Scope {
    pub fn code(&self) -> &'static str {
        match self {
            Scope::Unchanged => "U",
            Scope::Changed => "C",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(Scope::Unchanged),
            "C" => Some(Scope::Changed),
            _ => None,
        }
    }
}

/// Shared impact scale for Confidentiality, Integrity and Availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    #[serde(rename = "N")]
    None,
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "H")]
    High,
}

impl Impact {
    pub fn weight(&self) -> f64 {
        match self {
            Impact::None => 0.0,
            Impact::Low => 0.22,
            Impact::High => 0.56,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Impact::None => "N",
            Impact::Low => "L",
            Impact::High => "H",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Impact::None),
            "L" => Some(Impact::Low),
            "H" => Some(Impact::High),
            _ => None,
        }
    }
}

/// A complete CVSS v3.1 Base metric selection. Every field is a closed enum,
/// so an invalid selection is unrepresentable and scoring cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSelection {
    pub av: AttackVector,
    pub ac: AttackComplexity,
    pub pr: PrivilegesRequired,
    pub ui: UserInteraction,
    pub s: Scope,
    pub c: Impact,
    pub i: Impact,
    pub a: Impact,
}

impl Default for MetricSelection {
    /// AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N — the editing baseline.
    fn default() -> Self {
        Self {
            av: AttackVector::Network,
            ac: AttackComplexity::Low,
            pr: PrivilegesRequired::None,
            ui: UserInteraction::None,
            s: Scope::Unchanged,
            c: Impact::None,
            i: Impact::None,
            a: Impact::None,
        }
    }
}

impl MetricSelection {
    /// Canonical vector string: the eight metrics in fixed order, always all
    /// present. This is the only persisted representation of a selection.
    pub fn vector(&self) -> String {
        format!(
            "CVSS:3.1/AV:{}/AC:{}/PR:{}/UI:{}/S:{}/C:{}/I:{}/A:{}",
            self.av.code(),
            self.ac.code(),
            self.pr.code(),
            self.ui.code(),
            self.s.code(),
            self.c.code(),
            self.i.code(),
            self.a.code(),
        )
    }

    /// Parse a canonical vector back into a selection, so reopening a
    /// completed finding restores its prior metric choices.
    pub fn parse(vector: &str) -> Result<Self, WstgkitError> {
        let invalid = || WstgkitError::Validation(format!("Invalid CVSS vector: {}", vector));

        let mut parts = vector.split('/');
        if parts.next() != Some("CVSS:3.1") {
            return Err(invalid());
        }

        let mut take = |prefix: &str| -> Result<String, WstgkitError> {
            let part = parts.next().ok_or_else(invalid)?;
            part.strip_prefix(prefix).map(str::to_string).ok_or_else(invalid)
        };

        let av = AttackVector::from_code(&take("AV:")?).ok_or_else(invalid)?;
        let ac = AttackComplexity::from_code(&take("AC:")?).ok_or_else(invalid)?;
        let pr = PrivilegesRequired::from_code(&take("PR:")?).ok_or_else(invalid)?;
        let ui = UserInteraction::from_code(&take("UI:")?).ok_or_else(invalid)?;
        let s = Scope::from_code(&take("S:")?).ok_or_else(invalid)?;
        let c = Impact::from_code(&take("C:")?).ok_or_else(invalid)?;
        let i = Impact::from_code(&take("I:")?).ok_or_else(invalid)?;
        let a = Impact::from_code(&take("A:")?).ok_or_else(invalid)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { av, ac, pr, ui, s, c, i, a })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vector_is_all_baseline() {
        let m = MetricSelection::default();
        assert_eq!(m.vector(), "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N");
    }

    #[test]
    fn test_vector_parse_roundtrip() {
        let m = MetricSelection {
            av: AttackVector::Adjacent,
            ac: AttackComplexity::High,
            pr: PrivilegesRequired::Low,
            ui: UserInteraction::Required,
            s: Scope::Changed,
            c: Impact::High,
            i: Impact::Low,
            a: Impact::None,
        };
        let parsed = MetricSelection::parse(&m.vector()).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn test_parse_rejects_malformed_vectors() {
        for bad in [
            "",
            "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N",
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N",
            "CVSS:3.1/AV:X/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N",
            "CVSS:3.1/AC:L/AV:N/PR:N/UI:N/S:U/C:N/I:N/A:N",
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N/E:H",
        ] {
            assert!(MetricSelection::parse(bad).is_err(), "accepted: {}", bad);
        }
    }

    #[test]
    fn test_pr_weight_is_scope_adjusted() {
        assert_eq!(PrivilegesRequired::Low.weight(Scope::Unchanged), 0.62);
        assert_eq!(PrivilegesRequired::Low.weight(Scope::Changed), 0.68);
        assert_eq!(PrivilegesRequired::High.weight(Scope::Unchanged), 0.27);
        assert_eq!(PrivilegesRequired::High.weight(Scope::Changed), 0.50);
        assert_eq!(PrivilegesRequired::None.weight(Scope::Changed), 0.85);
    }
}
