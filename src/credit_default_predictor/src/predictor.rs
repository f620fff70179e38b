use crate::encoder::{self, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::error::{ArtifactError, ProfileError};
use crate::model::{Classifier, ClassifierModel, FeatureScaler, Scaler};
use crate::types::{CustomerProfile, ModelInfo, PredictionResult, RiskAssessment};
use crate::verdict;

pub struct Predictor<S = Scaler, C = ClassifierModel> {
    scaler: S,
    classifier: C,
}

fn check_shape(
    artifact: &'static str,
    n_features: usize,
    feature_names: Option<&[String]>,
) -> Result<(), ArtifactError> {
    if n_features != FEATURE_COUNT {
        return Err(ArtifactError::FeatureCount {
            artifact,
            expected: FEATURE_COUNT,
            found: n_features,
        });
    }
    let Some(names) = feature_names else {
        return Ok(());
    };
    if names.len() != FEATURE_COUNT {
        return Err(ArtifactError::FeatureCount {
            artifact,
            expected: FEATURE_COUNT,
            found: names.len(),
        });
    }
    for (position, (expected, found)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if *expected != found.as_str() {
            return Err(ArtifactError::FeatureOrder {
                artifact,
                position,
                expected: *expected,
                found: found.clone(),
            });
        }
    }
    Ok(())
}

impl Predictor {
    /// Parses both artifacts and builds the predictor.
    pub fn from_artifacts(scaler: &str, classifier: &str) -> Result<Self, ArtifactError> {
        Predictor::new(Scaler::from_json(scaler)?, ClassifierModel::from_json(classifier)?)
    }
}

impl<S: FeatureScaler, C: Classifier> Predictor<S, C> {
    pub fn new(scaler: S, classifier: C) -> Result<Self, ArtifactError> {
        check_shape("scaler", scaler.n_features(), scaler.feature_names())?;
        check_shape("classifier", classifier.n_features(), classifier.feature_names())?;
        Ok(Predictor { scaler, classifier })
    }

    /// Scales the vector and returns the hard label with p(default).
    pub fn score(&self, features: &FeatureVector) -> PredictionResult {
        let scaled = self.scaler.transform(features);
        let label = self.classifier.predict(&scaled);
        let probability = self.classifier.predict_proba(&scaled)[1];
        PredictionResult { label, probability }
    }

    /// Encode, score and render one submission.
    pub fn assess(&self, profile: &CustomerProfile) -> Result<RiskAssessment, ProfileError> {
        let features = encoder::encode(profile)?;
        let result = self.score(&features);
        Ok(RiskAssessment {
            label: result.label,
            probability: result.probability,
            verdict: verdict::render(&result),
        })
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            scaler_kind: self.scaler.kind().to_string(),
            classifier_kind: self.classifier.kind().to_string(),
            feature_count: FEATURE_COUNT as u32,
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            threshold: self.classifier.threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Identity;

    impl FeatureScaler for Identity {
        fn kind(&self) -> &'static str {
            "identity"
        }
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }
        fn feature_names(&self) -> Option<&[String]> {
            None
        }
        fn transform(&self, features: &FeatureVector) -> FeatureVector {
            *features
        }
    }

    /// Returns p(default) equal to the first feature.
    struct FirstFeature {
        n_features: usize,
        names: Option<Vec<String>>,
    }

    impl FirstFeature {
        fn new() -> Self {
            FirstFeature {
                n_features: FEATURE_COUNT,
                names: None,
            }
        }
    }

    impl Classifier for FirstFeature {
        fn kind(&self) -> &'static str {
            "first_feature"
        }
        fn n_features(&self) -> usize {
            self.n_features
        }
        fn feature_names(&self) -> Option<&[String]> {
            self.names.as_deref()
        }
        fn threshold(&self) -> f64 {
            0.5
        }
        fn predict_proba(&self, features: &FeatureVector) -> [f64; 2] {
            [1.0 - features.0[0], features.0[0]]
        }
    }

    fn vector(first: f64) -> FeatureVector {
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = first;
        FeatureVector(features)
    }

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn scores_through_injected_artifacts() {
        let predictor = Predictor::new(Identity, FirstFeature::new()).unwrap();
        assert_eq!(
            predictor.score(&vector(0.8)),
            PredictionResult {
                label: 1,
                probability: 0.8
            }
        );
        assert_eq!(
            predictor.score(&vector(0.2)),
            PredictionResult {
                label: 0,
                probability: 0.2
            }
        );
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        let classifier = FirstFeature {
            n_features: 22,
            names: None,
        };
        let err = Predictor::new(Identity, classifier).err().unwrap();
        assert!(matches!(
            err,
            ArtifactError::FeatureCount {
                artifact: "classifier",
                expected: 23,
                found: 22
            }
        ));
    }

    #[test]
    fn swapped_feature_names_are_rejected() {
        let mut swapped = names();
        swapped.swap(11, 17);
        let classifier = FirstFeature {
            n_features: FEATURE_COUNT,
            names: Some(swapped),
        };
        match Predictor::new(Identity, classifier).err().unwrap() {
            ArtifactError::FeatureOrder {
                position,
                expected,
                found,
                ..
            } => {
                assert_eq!(position, 11);
                assert_eq!(expected, "BILL_AMT1");
                assert_eq!(found, "PAY_AMT1");
            }
            other => panic!("expected FeatureOrder, got {other}"),
        }
    }

    #[test]
    fn matching_feature_names_are_accepted() {
        let classifier = FirstFeature {
            n_features: FEATURE_COUNT,
            names: Some(names()),
        };
        assert!(Predictor::new(Identity, classifier).is_ok());
    }

    #[test]
    fn artifacts_from_json_report_model_info() {
        let scaler = json!({
            "kind": "standard_scaler",
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
            "feature_names_in_": names(),
        });
        let classifier = json!({
            "kind": "logistic_regression",
            "coef": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0,
        });
        let predictor =
            Predictor::from_artifacts(&scaler.to_string(), &classifier.to_string()).unwrap();

        let info = predictor.info();
        assert_eq!(info.scaler_kind, "standard_scaler");
        assert_eq!(info.classifier_kind, "logistic_regression");
        assert_eq!(info.feature_count, 23);
        assert_eq!(info.feature_names[0], "LIMIT_BAL");
        assert_eq!(info.threshold, 0.5);
    }

    #[test]
    fn missing_artifact_prevents_construction() {
        let classifier = json!({
            "kind": "logistic_regression",
            "coef": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0,
        });
        assert!(Predictor::from_artifacts("", &classifier.to_string()).is_err());
    }
}
