use candid::Nat;
use num_traits::cast::ToPrimitive;

use crate::encoder::{BILL_FEATURES, PAY_AMT_FEATURES, REPAYMENT_FEATURES};
use crate::error::ProfileError;
use crate::types::{
    CategoricalField, CustomerForm, CustomerProfile, Education, FormSchema, Gender, MaritalStatus,
    NumericField, RepaymentHistory, RepaymentLabels, RepaymentStatus,
};

/// Inclusive bounds of a numeric widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

pub const CREDIT_LIMIT: Bounds = Bounds {
    min: 10_000,
    max: 1_000_000,
    step: 10_000,
};

pub const AGE: Bounds = Bounds {
    min: 18,
    max: 100,
    step: 1,
};

/// Shared by all twelve bill and payment amounts.
pub const AMOUNT: Bounds = Bounds {
    min: 0,
    max: 1_000_000,
    step: 1,
};

const REPAYMENT_WIDGET_LABELS: [&str; 6] = [
    "Last Month (PAY_0)",
    "2 Months Ago (PAY_2)",
    "3 Months Ago (PAY_3)",
    "4 Months Ago (PAY_4)",
    "5 Months Ago (PAY_5)",
    "6 Months Ago (PAY_6)",
];

fn out_of_range(field: &str, bounds: Bounds, value: impl ToString) -> ProfileError {
    ProfileError::OutOfRange {
        field: field.to_string(),
        min: bounds.min,
        max: bounds.max,
        value: value.to_string(),
    }
}

/// Checks a Nat field against its bounds and returns it as a float.
pub fn checked_amount(field: &str, value: &Nat, bounds: Bounds) -> Result<f64, ProfileError> {
    if *value < Nat::from(bounds.min) || *value > Nat::from(bounds.max) {
        return Err(out_of_range(field, bounds, &value.0));
    }
    value
        .0
        .to_f64()
        .ok_or_else(|| out_of_range(field, bounds, &value.0))
}

pub fn checked_age(age: u8) -> Result<f64, ProfileError> {
    let wide = u64::from(age);
    if wide < AGE.min || wide > AGE.max {
        return Err(out_of_range("AGE", AGE, age));
    }
    Ok(f64::from(age))
}

fn options(labels: impl IntoIterator<Item = &'static str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}

const CUSTOMER_SECTION: &str = "Customer Information";
const REPAYMENT_SECTION: &str = "Repayment Status (Past 6 Months)";
const BILL_SECTION: &str = "Bill Amounts";
const PAYMENT_SECTION: &str = "Payment Amounts";

/// Hands out page positions in layout order.
struct Layout {
    next: u32,
}

impl Layout {
    fn position(&mut self) -> u32 {
        let position = self.next;
        self.next += 1;
        position
    }

    fn numeric(&mut self, section: &str, name: &str, label: &str, bounds: Bounds) -> NumericField {
        NumericField {
            name: name.to_string(),
            label: label.to_string(),
            section: section.to_string(),
            position: self.position(),
            min: bounds.min,
            max: bounds.max,
            step: bounds.step,
        }
    }

    fn categorical(
        &mut self,
        section: &str,
        name: &str,
        label: &str,
        options: Vec<String>,
    ) -> CategoricalField {
        CategoricalField {
            name: name.to_string(),
            label: label.to_string(),
            section: section.to_string(),
            position: self.position(),
            options,
        }
    }
}

/// Widget definitions, split by kind. `position` restores the page order:
/// limit, age, gender, education, marital status, the six repayment
/// statuses, then bills and payments.
pub fn schema() -> FormSchema {
    let mut layout = Layout { next: 0 };
    let mut numeric_fields = Vec::new();
    let mut categorical_fields = Vec::new();

    numeric_fields.push(layout.numeric(CUSTOMER_SECTION, "LIMIT_BAL", "Credit Limit", CREDIT_LIMIT));
    numeric_fields.push(layout.numeric(CUSTOMER_SECTION, "AGE", "Age", AGE));
    categorical_fields.push(layout.categorical(
        CUSTOMER_SECTION,
        "SEX",
        "Gender",
        options(Gender::ALL.iter().map(|g| g.label())),
    ));
    categorical_fields.push(layout.categorical(
        CUSTOMER_SECTION,
        "EDUCATION",
        "Education Level",
        options(Education::ALL.iter().map(|e| e.label())),
    ));
    categorical_fields.push(layout.categorical(
        CUSTOMER_SECTION,
        "MARRIAGE",
        "Marital Status",
        options(MaritalStatus::ALL.iter().map(|m| m.label())),
    ));

    let repayment_options = options(RepaymentStatus::ALL.iter().map(|s| s.label()));
    for (name, label) in REPAYMENT_FEATURES.iter().zip(REPAYMENT_WIDGET_LABELS) {
        categorical_fields.push(layout.categorical(
            REPAYMENT_SECTION,
            name,
            label,
            repayment_options.clone(),
        ));
    }

    for (i, name) in BILL_FEATURES.iter().enumerate() {
        let label = format!("Bill Amount {}", i + 1);
        numeric_fields.push(layout.numeric(BILL_SECTION, name, &label, AMOUNT));
    }
    for (i, name) in PAY_AMT_FEATURES.iter().enumerate() {
        let label = format!("Payment Amount {}", i + 1);
        numeric_fields.push(layout.numeric(PAYMENT_SECTION, name, &label, AMOUNT));
    }

    FormSchema {
        numeric: numeric_fields,
        categorical: categorical_fields,
    }
}

/// Parses one repayment label, naming the month it came from on failure.
fn repayment_status(field: &str, label: &str) -> Result<RepaymentStatus, ProfileError> {
    RepaymentStatus::from_label(label).map_err(|_| ProfileError::unknown_label(field, label))
}

impl TryFrom<&RepaymentLabels> for RepaymentHistory {
    type Error = ProfileError;

    fn try_from(labels: &RepaymentLabels) -> Result<Self, Self::Error> {
        let [f0, f2, f3, f4, f5, f6] = REPAYMENT_FEATURES;
        Ok(RepaymentHistory {
            pay_0: repayment_status(f0, &labels.pay_0)?,
            pay_2: repayment_status(f2, &labels.pay_2)?,
            pay_3: repayment_status(f3, &labels.pay_3)?,
            pay_4: repayment_status(f4, &labels.pay_4)?,
            pay_5: repayment_status(f5, &labels.pay_5)?,
            pay_6: repayment_status(f6, &labels.pay_6)?,
        })
    }
}

impl TryFrom<CustomerForm> for CustomerProfile {
    type Error = ProfileError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        Ok(CustomerProfile {
            gender: Gender::from_label(&form.gender)?,
            education: Education::from_label(&form.education)?,
            marital_status: MaritalStatus::from_label(&form.marital_status)?,
            repayment: RepaymentHistory::try_from(&form.repayment)?,
            credit_limit: form.credit_limit,
            age: form.age,
            bill_amounts: form.bill_amounts,
            payment_amounts: form.payment_amounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AmountHistory;

    fn form() -> CustomerForm {
        CustomerForm {
            credit_limit: Nat::from(50_000u64),
            age: 30,
            gender: "Female".into(),
            education: "University".into(),
            marital_status: "Single".into(),
            repayment: RepaymentLabels {
                pay_0: "Paid duly".into(),
                pay_2: "Revolving credit".into(),
                pay_3: "3 months delay".into(),
                pay_4: "No consumption".into(),
                pay_5: "8 months delay".into(),
                pay_6: "1 month delay".into(),
            },
            bill_amounts: AmountHistory::default(),
            payment_amounts: AmountHistory::default(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(
            checked_amount("LIMIT_BAL", &Nat::from(10_000u64), CREDIT_LIMIT),
            Ok(10_000.0)
        );
        assert_eq!(
            checked_amount("LIMIT_BAL", &Nat::from(1_000_000u64), CREDIT_LIMIT),
            Ok(1_000_000.0)
        );
        assert_eq!(checked_age(18), Ok(18.0));
        assert_eq!(checked_age(100), Ok(100.0));
        assert_eq!(checked_amount("BILL_AMT1", &Nat::from(0u64), AMOUNT), Ok(0.0));
    }

    #[test]
    fn values_outside_bounds_are_rejected() {
        let err = checked_amount("LIMIT_BAL", &Nat::from(9_999u64), CREDIT_LIMIT).unwrap_err();
        assert_eq!(
            err,
            ProfileError::OutOfRange {
                field: "LIMIT_BAL".into(),
                min: 10_000,
                max: 1_000_000,
                value: "9999".into(),
            }
        );
        assert!(checked_amount("PAY_AMT6", &Nat::from(1_000_001u64), AMOUNT).is_err());
        assert!(checked_age(17).is_err());
        assert!(checked_age(101).is_err());
    }

    #[test]
    fn form_labels_convert_to_typed_profile() {
        let profile = CustomerProfile::try_from(form()).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.education, Education::University);
        assert_eq!(profile.marital_status, MaritalStatus::Single);
        assert_eq!(profile.repayment.pay_3, RepaymentStatus::Delay3Months);
        assert_eq!(profile.repayment.pay_5, RepaymentStatus::Delay8Months);
        assert_eq!(profile.repayment.pay_4, RepaymentStatus::NoConsumption);
    }

    #[test]
    fn unknown_label_fails_loudly() {
        let mut bad = form();
        bad.education = "PhD".into();
        assert_eq!(
            CustomerProfile::try_from(bad).unwrap_err(),
            ProfileError::unknown_label("EDUCATION", "PhD")
        );

        let mut bad = form();
        bad.repayment.pay_6 = "9 months delay".into();
        assert_eq!(
            CustomerProfile::try_from(bad).unwrap_err(),
            ProfileError::unknown_label("PAY_6", "9 months delay")
        );
    }

    #[test]
    fn schema_positions_follow_page_layout() {
        let schema = schema();
        let mut fields: Vec<(u32, &str, &str)> = schema
            .numeric
            .iter()
            .map(|f| (f.position, f.name.as_str(), f.section.as_str()))
            .chain(
                schema
                    .categorical
                    .iter()
                    .map(|f| (f.position, f.name.as_str(), f.section.as_str())),
            )
            .collect();
        fields.sort_by_key(|(position, _, _)| *position);

        let positions: Vec<u32> = fields.iter().map(|(p, _, _)| *p).collect();
        assert_eq!(positions, (0..23).collect::<Vec<u32>>());

        let names: Vec<&str> = fields.iter().map(|(_, n, _)| *n).collect();
        assert_eq!(
            &names[..7],
            &["LIMIT_BAL", "AGE", "SEX", "EDUCATION", "MARRIAGE", "PAY_0", "PAY_2"]
        );
        assert_eq!(names[11], "BILL_AMT1");
        assert_eq!(names[17], "PAY_AMT1");
        assert_eq!(names[22], "PAY_AMT6");

        assert_eq!(fields[4].2, "Customer Information");
        assert_eq!(fields[5].2, "Repayment Status (Past 6 Months)");
        assert_eq!(fields[11].2, "Bill Amounts");
        assert_eq!(fields[22].2, "Payment Amounts");
    }

    #[test]
    fn schema_lists_every_field_once() {
        let schema = schema();
        assert_eq!(schema.numeric.len() + schema.categorical.len(), 23);

        let limit = &schema.numeric[0];
        assert_eq!((limit.min, limit.max, limit.step), (10_000, 1_000_000, 10_000));

        let pay_0 = schema
            .categorical
            .iter()
            .find(|f| f.name == "PAY_0")
            .unwrap();
        assert_eq!(pay_0.options.len(), 11);
        assert_eq!(pay_0.options[0], "No consumption");
        assert_eq!(pay_0.options[10], "8 months delay");
    }
}
