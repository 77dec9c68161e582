use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CourierId);
id_newtype!(VehicleId);
id_newtype!(LoanId);
id_newtype!(BonusId);
id_newtype!(AttendanceId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    Active,
    Suspended,
    Offboarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Bike,
    Motorbike,
    Car,
    Van,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved,
    Repaying,
    Settled,
    Defaulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMark {
    Present,
    Absent,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierSummary {
    pub courier_id: CourierId,
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub status: CourierStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub vehicle_id: VehicleId,
    pub plate_number: String,
    pub kind: VehicleKind,
    pub assigned_courier: Option<CourierId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: LoanId,
    pub courier_id: CourierId,
    pub principal_cents: i64,
    pub status: LoanStatus,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSummary {
    pub bonus_id: BonusId,
    pub courier_id: CourierId,
    pub amount_cents: i64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub attendance_id: AttendanceId,
    pub courier_id: CourierId,
    pub day: NaiveDate,
    pub mark: AttendanceMark,
}

/// One entry of the append-only audit trail the backend keeps for every
/// administrative write. Read-only on the console side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity: String,
    pub recorded_at: DateTime<Utc>,
}
