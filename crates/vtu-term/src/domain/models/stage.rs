use vtu_core::catalog::Carrier;
use vtu_core::catalog::Disco;
use vtu_core::DataPlan;
use vtu_core::MeterType;

/// The interpreter's position within a scripted flow.
///
/// Each mid-flow variant carries exactly the parameters accumulated so far,
/// so a value collected for one flow can never be read by another. The stage
/// is reset to `Idle` on completion, failure, or abort, which discards the
/// pending parameters with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Stage {
    #[default]
    Idle,

    LoginEmail,
    LoginPassword {
        email: String,
    },

    SignupUsername,
    SignupEmail {
        username: String,
    },
    SignupPassword {
        username: String,
        email: String,
    },

    DataNetwork,
    DataPlansLoading {
        carrier: Carrier,
    },
    DataPlanChoice {
        carrier: Carrier,
        plans: Vec<DataPlan>,
    },
    DataNumber {
        carrier: Carrier,
        plan: DataPlan,
    },

    AirtimeNetwork,
    AirtimeAmount {
        carrier: Carrier,
    },
    AirtimeNumber {
        carrier: Carrier,
        amount: u64,
    },

    ElectricityProvider,
    ElectricityMeterType {
        disco: Disco,
    },
    ElectricityMeterNumber {
        disco: Disco,
        meter_type: MeterType,
    },
    ElectricityAmount {
        disco: Disco,
        meter_type: MeterType,
        meter_number: String,
    },
    ElectricityNumber {
        disco: Disco,
        meter_type: MeterType,
        meter_number: String,
        amount: u64,
    },

    UpdateUsername,
    UpdateEmail {
        username: String,
    },

    PasswordCurrent,
    PasswordNew {
        current: String,
    },
}

impl Stage {
    pub fn is_idle(&self) -> bool {
        return *self == Stage::Idle;
    }

    /// Secret-collection stages echo a masked placeholder instead of the
    /// submitted text, and the input line renders masked while active.
    pub fn is_secret_entry(&self) -> bool {
        return matches!(
            self,
            Stage::LoginPassword { .. }
                | Stage::SignupPassword { .. }
                | Stage::PasswordCurrent
                | Stage::PasswordNew { .. }
        );
    }

    /// Themed stage label shown in the header bar.
    pub fn name(&self) -> &'static str {
        return match self {
            Stage::Idle => "COMMAND",
            Stage::LoginEmail => "LOGIN_EMAIL",
            Stage::LoginPassword { .. } => "LOGIN_PASS",
            Stage::SignupUsername => "SIGNUP_USER",
            Stage::SignupEmail { .. } => "SIGNUP_EMAIL",
            Stage::SignupPassword { .. } => "SIGNUP_PASS",
            Stage::DataNetwork => "DATA_NET",
            Stage::DataPlansLoading { .. } => "DATA_SCAN",
            Stage::DataPlanChoice { .. } => "DATA_PLAN",
            Stage::DataNumber { .. } => "DATA_NUM",
            Stage::AirtimeNetwork => "AIRTIME_NET",
            Stage::AirtimeAmount { .. } => "AIRTIME_AMT",
            Stage::AirtimeNumber { .. } => "AIRTIME_NUM",
            Stage::ElectricityProvider => "ELECT_DISCO",
            Stage::ElectricityMeterType { .. } => "ELECT_TYPE",
            Stage::ElectricityMeterNumber { .. } => "ELECT_MET",
            Stage::ElectricityAmount { .. } => "ELECT_AMT",
            Stage::ElectricityNumber { .. } => "ELECT_NUM",
            Stage::UpdateUsername => "UPDATE_USER",
            Stage::UpdateEmail { .. } => "UPDATE_EMAIL",
            Stage::PasswordCurrent => "PASSWD_OLD",
            Stage::PasswordNew { .. } => "PASSWD_NEW",
        };
    }
}
