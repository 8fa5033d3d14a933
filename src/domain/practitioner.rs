//! Practitioner domain model (DrChrono "doctors")

use serde::{Deserialize, Serialize};

/// Weekly availability block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    /// 0 = Sunday
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

/// Clinician registered with a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleBlock>,
}

impl Practitioner {
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practitioner_display_name() {
        let doctor: Practitioner = serde_json::from_str(
            r#"{"id":"d-1","firstName":"Gregory","lastName":"House","specialty":"Diagnostics"}"#,
        )
        .unwrap();
        assert_eq!(doctor.display_name(), "Dr. Gregory House");
        assert!(doctor.department.is_empty());
    }
}
