use crate::error::ProfileError;
use crate::form::{self, AMOUNT, CREDIT_LIMIT};
use crate::types::{CustomerProfile, Education, Gender, MaritalStatus, RepaymentStatus};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 23;

pub const REPAYMENT_FEATURES: [&str; 6] = ["PAY_0", "PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"];

pub const BILL_FEATURES: [&str; 6] = [
    "BILL_AMT1", "BILL_AMT2", "BILL_AMT3", "BILL_AMT4", "BILL_AMT5", "BILL_AMT6",
];

pub const PAY_AMT_FEATURES: [&str; 6] = [
    "PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5", "PAY_AMT6",
];

/// Training column names in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "LIMIT_BAL",
    "SEX",
    "EDUCATION",
    "MARRIAGE",
    "AGE",
    "PAY_0",
    "PAY_2",
    "PAY_3",
    "PAY_4",
    "PAY_5",
    "PAY_6",
    "BILL_AMT1",
    "BILL_AMT2",
    "BILL_AMT3",
    "BILL_AMT4",
    "BILL_AMT5",
    "BILL_AMT6",
    "PAY_AMT1",
    "PAY_AMT2",
    "PAY_AMT3",
    "PAY_AMT4",
    "PAY_AMT5",
    "PAY_AMT6",
];

/// Encoded profile. The length is part of the type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

/// Implements the label table and integer codes for a closed categorical
/// field. `$field` is the training column reported in `UnknownLabel`.
macro_rules! categorical {
    ($ty:ident, $field:literal, { $($variant:ident => ($label:literal, $code:literal)),+ $(,)? }) => {
        impl $ty {
            /// Every value, in form display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn code(self) -> i8 {
                match self {
                    $($ty::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Result<Self, ProfileError> {
                match label {
                    $($label => Ok($ty::$variant),)+
                    other => Err(ProfileError::unknown_label($field, other)),
                }
            }
        }
    };
}

categorical!(Gender, "SEX", {
    Male => ("Male", 1),
    Female => ("Female", 2),
});

categorical!(Education, "EDUCATION", {
    GraduateSchool => ("Graduate School", 1),
    University => ("University", 2),
    HighSchool => ("High School", 3),
    Others => ("Others", 4),
});

categorical!(MaritalStatus, "MARRIAGE", {
    Married => ("Married", 1),
    Single => ("Single", 2),
    Others => ("Others", 3),
});

// Codes are months of delay; -2 and -1 mean no balance and paid in full.
categorical!(RepaymentStatus, "PAY", {
    NoConsumption => ("No consumption", -2),
    PaidDuly => ("Paid duly", -1),
    RevolvingCredit => ("Revolving credit", 0),
    Delay1Month => ("1 month delay", 1),
    Delay2Months => ("2 months delay", 2),
    Delay3Months => ("3 months delay", 3),
    Delay4Months => ("4 months delay", 4),
    Delay5Months => ("5 months delay", 5),
    Delay6Months => ("6 months delay", 6),
    Delay7Months => ("7 months delay", 7),
    Delay8Months => ("8 months delay", 8),
});

/// Builds the feature vector for one submission.
///
/// Fails only when a numeric field lies outside its form bounds.
pub fn encode(profile: &CustomerProfile) -> Result<FeatureVector, ProfileError> {
    let mut features = [0.0; FEATURE_COUNT];

    features[0] = form::checked_amount("LIMIT_BAL", &profile.credit_limit, CREDIT_LIMIT)?;
    features[1] = f64::from(profile.gender.code());
    features[2] = f64::from(profile.education.code());
    features[3] = f64::from(profile.marital_status.code());
    features[4] = form::checked_age(profile.age)?;

    for (i, status) in profile.repayment.months().into_iter().enumerate() {
        features[5 + i] = f64::from(status.code());
    }
    for (i, amount) in profile.bill_amounts.months().into_iter().enumerate() {
        features[11 + i] = form::checked_amount(BILL_FEATURES[i], amount, AMOUNT)?;
    }
    for (i, amount) in profile.payment_amounts.months().into_iter().enumerate() {
        features[17 + i] = form::checked_amount(PAY_AMT_FEATURES[i], amount, AMOUNT)?;
    }

    Ok(FeatureVector(features))
}
