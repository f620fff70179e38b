use candid::{CandidType, Nat};
use serde::{Deserialize, Serialize};

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Education {
    GraduateSchool,
    University,
    HighSchool,
    Others,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaritalStatus {
    Married,
    Single,
    Others,
}

/// Monthly repayment status, ordered from best standing to most delinquent.
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RepaymentStatus {
    NoConsumption,
    PaidDuly,
    RevolvingCredit,
    Delay1Month,
    Delay2Months,
    Delay3Months,
    Delay4Months,
    Delay5Months,
    Delay6Months,
    Delay7Months,
    Delay8Months,
}

/// Repayment status for the last six months, newest first.
///
/// Field names follow the training columns, which skip `PAY_1`.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RepaymentHistory {
    pub pay_0: RepaymentStatus,
    pub pay_2: RepaymentStatus,
    pub pay_3: RepaymentStatus,
    pub pay_4: RepaymentStatus,
    pub pay_5: RepaymentStatus,
    pub pay_6: RepaymentStatus,
}

impl RepaymentHistory {
    /// Same status for all six months.
    pub fn uniform(status: RepaymentStatus) -> Self {
        Self {
            pay_0: status,
            pay_2: status,
            pay_3: status,
            pay_4: status,
            pay_5: status,
            pay_6: status,
        }
    }

    pub fn months(&self) -> [RepaymentStatus; 6] {
        [
            self.pay_0, self.pay_2, self.pay_3, self.pay_4, self.pay_5, self.pay_6,
        ]
    }
}

/// Six monthly amounts (bills or payments), month 1 first.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AmountHistory {
    pub amt_1: Nat,
    pub amt_2: Nat,
    pub amt_3: Nat,
    pub amt_4: Nat,
    pub amt_5: Nat,
    pub amt_6: Nat,
}

impl AmountHistory {
    pub fn from_u64(amounts: [u64; 6]) -> Self {
        let [a1, a2, a3, a4, a5, a6] = amounts;
        Self {
            amt_1: Nat::from(a1),
            amt_2: Nat::from(a2),
            amt_3: Nat::from(a3),
            amt_4: Nat::from(a4),
            amt_5: Nat::from(a5),
            amt_6: Nat::from(a6),
        }
    }

    pub fn months(&self) -> [&Nat; 6] {
        [
            &self.amt_1,
            &self.amt_2,
            &self.amt_3,
            &self.amt_4,
            &self.amt_5,
            &self.amt_6,
        ]
    }
}

/// One form submission with typed categorical fields.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomerProfile {
    pub credit_limit: Nat,
    pub age: u8,
    pub gender: Gender,
    pub education: Education,
    pub marital_status: MaritalStatus,
    pub repayment: RepaymentHistory,
    pub bill_amounts: AmountHistory,
    pub payment_amounts: AmountHistory,
}

/// Repayment statuses as display labels, e.g. `"3 months delay"`.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct RepaymentLabels {
    pub pay_0: String,
    pub pay_2: String,
    pub pay_3: String,
    pub pay_4: String,
    pub pay_5: String,
    pub pay_6: String,
}

/// One form submission as posted by a label-based HTML form.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct CustomerForm {
    pub credit_limit: Nat,
    pub age: u8,
    pub gender: String,
    pub education: String,
    pub marital_status: String,
    pub repayment: RepaymentLabels,
    pub bill_amounts: AmountHistory,
    pub payment_amounts: AmountHistory,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PredictionResult {
    pub label: u8, // 0 = low risk, 1 = high risk
    pub probability: f64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    pub label: u8,
    pub probability: f64,
    pub verdict: String,
}

/// Install and upgrade argument: the serialized artifacts as JSON text.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct InitArgs {
    pub scaler: String,
    pub classifier: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelInfo {
    pub scaler_kind: String,
    pub classifier_kind: String,
    pub feature_count: u32,
    pub feature_names: Vec<String>,
    pub threshold: f64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NumericField {
    pub name: String,
    pub label: String,
    pub section: String,
    pub position: u32,
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CategoricalField {
    pub name: String,
    pub label: String,
    pub section: String,
    pub position: u32,
    pub options: Vec<String>,
}

/// Everything the form needs to render its widgets. Each field carries its
/// section header and its position in the page layout.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormSchema {
    pub numeric: Vec<NumericField>,
    pub categorical: Vec<CategoricalField>,
}
