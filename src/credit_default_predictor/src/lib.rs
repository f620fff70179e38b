// src/credit_default_predictor/lib.rs
use ic_cdk_macros::{init, post_upgrade, query};
use once_cell::sync::OnceCell;

pub mod encoder;
pub mod error;
pub mod form;
pub mod model;
pub mod predictor;
pub mod types;
pub mod verdict;

use error::ProfileError;
use predictor::Predictor;
use types::{
    CustomerForm, CustomerProfile, FormSchema, InitArgs, ModelInfo, PredictionResult,
    RiskAssessment,
};

/// Predictor built from the install argument. Never mutated after load.
static PREDICTOR: OnceCell<Predictor> = OnceCell::new();

/// Parses the artifacts or traps, so a bad artifact aborts the install.
fn load_artifacts(args: InitArgs) {
    let predictor = match Predictor::from_artifacts(&args.scaler, &args.classifier) {
        Ok(predictor) => predictor,
        Err(e) => {
            let msg = format!("Failed to load model artifacts: {}", e);
            ic_cdk::println!("{}", msg);
            ic_cdk::trap(&msg);
        }
    };

    let info = predictor.info();
    if PREDICTOR.set(predictor).is_err() {
        ic_cdk::trap("Model artifacts are already loaded");
    }
    ic_cdk::println!(
        "Credit Default Predictor initialized: {} + {} over {} features",
        info.scaler_kind,
        info.classifier_kind,
        info.feature_count
    );
}

fn predictor() -> &'static Predictor {
    match PREDICTOR.get() {
        Some(predictor) => predictor,
        None => ic_cdk::trap("Model artifacts are not loaded"),
    }
}

fn assess_profile(profile: &CustomerProfile) -> Result<RiskAssessment, ProfileError> {
    let assessment = predictor().assess(profile).inspect_err(|e| {
        ic_cdk::println!("Rejected submission: {}", e);
    })?;
    ic_cdk::println!(
        "Assessed: label={} probability={:.4}",
        assessment.label,
        assessment.probability
    );
    Ok(assessment)
}

#[init]
fn init(args: InitArgs) {
    load_artifacts(args);
}

/// Heap state does not survive an upgrade; the artifacts are supplied again.
#[post_upgrade]
fn post_upgrade(args: InitArgs) {
    load_artifacts(args);
}

/// Widget bounds and option labels for the form.
#[query]
fn form_schema() -> FormSchema {
    form::schema()
}

/// Feature vector the classifier would see for this profile.
#[query]
fn encode(profile: CustomerProfile) -> Result<Vec<f64>, ProfileError> {
    encoder::encode(&profile).map(|features| features.to_vec())
}

#[query]
fn predict(profile: CustomerProfile) -> Result<PredictionResult, ProfileError> {
    let features = encoder::encode(&profile)?;
    ic_cdk::println!("Features: {:?}", features.as_slice());
    Ok(predictor().score(&features))
}

#[query]
fn assess(profile: CustomerProfile) -> Result<RiskAssessment, ProfileError> {
    assess_profile(&profile)
}

/// Same as `assess`, for forms that post categorical fields as labels.
#[query]
fn assess_form(form: CustomerForm) -> Result<RiskAssessment, ProfileError> {
    let profile = CustomerProfile::try_from(form).inspect_err(|e| {
        ic_cdk::println!("Rejected submission: {}", e);
    })?;
    assess_profile(&profile)
}

#[query]
fn model_info() -> ModelInfo {
    predictor().info()
}

#[query]
fn version() -> String {
    "credit_default_predictor v0.1.0".to_string()
}

ic_cdk::export_candid!();
