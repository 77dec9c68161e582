use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceMark, CourierId, CourierStatus, LoanStatus, VehicleKind};

/// Form payload for creating or replacing a courier record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierDraft {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub status: CourierStatus,
}

impl Default for CourierDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            city: String::new(),
            status: CourierStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub plate_number: String,
    pub kind: VehicleKind,
    pub assigned_courier: Option<CourierId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub courier_id: CourierId,
    pub principal_cents: i64,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusDraft {
    pub courier_id: CourierId,
    pub amount_cents: i64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDraft {
    pub courier_id: CourierId,
    pub day: NaiveDate,
    pub mark: AttendanceMark,
}
