//! Document kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of compliance document the suite manages.
///
/// Every kind shares the same table and handlers; the kind doubles as
/// the permission system id (plural slug) for its routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Company policies.
    Policy,
    /// Operating manuals.
    Manual,
    /// Written procedures.
    Procedure,
    /// Blank forms and templates.
    Form,
    /// Certificates of compliance.
    Certificate,
    /// Statutory registers.
    Register,
    /// Internal audit records.
    AuditRecord,
    /// COSHH assessment sheets.
    Coshh,
    /// Risk assessments.
    RiskAssessment,
}

impl DocumentKind {
    /// All known kinds.
    pub const ALL: [DocumentKind; 9] = [
        Self::Policy,
        Self::Manual,
        Self::Procedure,
        Self::Form,
        Self::Certificate,
        Self::Register,
        Self::AuditRecord,
        Self::Coshh,
        Self::RiskAssessment,
    ];

    /// Return the kind as its stored snake_case slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Manual => "manual",
            Self::Procedure => "procedure",
            Self::Form => "form",
            Self::Certificate => "certificate",
            Self::Register => "register",
            Self::AuditRecord => "audit_record",
            Self::Coshh => "coshh",
            Self::RiskAssessment => "risk_assessment",
        }
    }

    /// The permission system id governing this kind's routes.
    pub fn system_id(&self) -> &'static str {
        match self {
            Self::Policy => "policies",
            Self::Manual => "manuals",
            Self::Procedure => "procedures",
            Self::Form => "forms",
            Self::Certificate => "certificates",
            Self::Register => "registers",
            Self::AuditRecord => "audit-records",
            Self::Coshh => "coshh",
            Self::RiskAssessment => "risk-assessments",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = docsuite_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "policy" => Ok(Self::Policy),
            "manual" => Ok(Self::Manual),
            "procedure" => Ok(Self::Procedure),
            "form" => Ok(Self::Form),
            "certificate" => Ok(Self::Certificate),
            "register" => Ok(Self::Register),
            "audit_record" => Ok(Self::AuditRecord),
            "coshh" => Ok(Self::Coshh),
            "risk_assessment" => Ok(Self::RiskAssessment),
            _ => Err(docsuite_core::AppError::not_found(format!(
                "Unknown document kind: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.as_str().parse::<DocumentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn system_ids_are_distinct() {
        let mut systems: Vec<_> = DocumentKind::ALL.iter().map(|k| k.system_id()).collect();
        systems.sort_unstable();
        systems.dedup();
        assert_eq!(systems.len(), DocumentKind::ALL.len());
    }

    #[test]
    fn unknown_slug_is_not_found() {
        assert!("minutes".parse::<DocumentKind>().is_err());
    }
}
