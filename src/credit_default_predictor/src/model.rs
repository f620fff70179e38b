use serde::Deserialize;

use crate::encoder::{FeatureVector, FEATURE_COUNT};
use crate::error::ArtifactError;

/// Applies the fitted feature scaling.
pub trait FeatureScaler {
    fn kind(&self) -> &'static str;

    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Training column names, when the artifact recorded them.
    fn feature_names(&self) -> Option<&[String]>;

    fn transform(&self, features: &FeatureVector) -> FeatureVector;
}

/// Binary classifier over scaled features. Class 1 is "default".
pub trait Classifier {
    fn kind(&self) -> &'static str;

    fn n_features(&self) -> usize;

    fn feature_names(&self) -> Option<&[String]>;

    /// Probability above which `predict` returns 1.
    fn threshold(&self) -> f64;

    /// `[p(class 0), p(class 1)]`.
    fn predict_proba(&self, features: &FeatureVector) -> [f64; 2];

    fn predict(&self, features: &FeatureVector) -> u8 {
        if self.predict_proba(features)[1] > self.threshold() {
            1
        } else {
            0
        }
    }
}

fn check_finite(
    artifact: &'static str,
    parameter: &'static str,
    values: &[f64],
) -> Result<(), ArtifactError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ArtifactError::NonFinite {
            artifact,
            parameter,
            index,
        }),
        None => Ok(()),
    }
}

fn check_same_len(
    artifact: &'static str,
    parameter: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), ArtifactError> {
    if expected != found {
        return Err(ArtifactError::ParameterLength {
            artifact,
            parameter,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_feature_count(artifact: &'static str, found: usize) -> Result<(), ArtifactError> {
    if found != FEATURE_COUNT {
        return Err(ArtifactError::FeatureCount {
            artifact,
            expected: FEATURE_COUNT,
            found,
        });
    }
    Ok(())
}

/// Fitted scaler, tagged by `kind` in the artifact.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    StandardScaler {
        #[serde(alias = "mean_")]
        mean: Vec<f64>,
        #[serde(alias = "scale_")]
        scale: Vec<f64>,
        #[serde(default, alias = "feature_names_in_")]
        feature_names: Option<Vec<String>>,
    },
    /// `x * scale + min`
    MinMaxScaler {
        #[serde(alias = "min_")]
        min: Vec<f64>,
        #[serde(alias = "scale_")]
        scale: Vec<f64>,
        #[serde(default, alias = "feature_names_in_")]
        feature_names: Option<Vec<String>>,
    },
}

impl Scaler {
    const ARTIFACT: &'static str = "scaler";

    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        let scaler: Scaler = serde_json::from_str(text).map_err(|source| ArtifactError::Parse {
            artifact: Self::ARTIFACT,
            source,
        })?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            Scaler::StandardScaler { mean, scale, .. } => {
                check_same_len(Self::ARTIFACT, "scale", mean.len(), scale.len())?;
                check_feature_count(Self::ARTIFACT, mean.len())?;
                check_finite(Self::ARTIFACT, "mean", mean)?;
                check_finite(Self::ARTIFACT, "scale", scale)?;
                if let Some(index) = scale.iter().position(|s| *s == 0.0) {
                    return Err(ArtifactError::ZeroScale { index });
                }
            }
            Scaler::MinMaxScaler { min, scale, .. } => {
                check_same_len(Self::ARTIFACT, "scale", min.len(), scale.len())?;
                check_feature_count(Self::ARTIFACT, min.len())?;
                check_finite(Self::ARTIFACT, "min", min)?;
                check_finite(Self::ARTIFACT, "scale", scale)?;
            }
        }
        Ok(())
    }
}

impl FeatureScaler for Scaler {
    fn kind(&self) -> &'static str {
        match self {
            Scaler::StandardScaler { .. } => "standard_scaler",
            Scaler::MinMaxScaler { .. } => "min_max_scaler",
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Scaler::StandardScaler { mean, .. } => mean.len(),
            Scaler::MinMaxScaler { min, .. } => min.len(),
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            Scaler::StandardScaler { feature_names, .. }
            | Scaler::MinMaxScaler { feature_names, .. } => feature_names.as_deref(),
        }
    }

    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut scaled = [0.0; FEATURE_COUNT];
        match self {
            Scaler::StandardScaler { mean, scale, .. } => {
                let params = mean.iter().zip(scale);
                for ((out, x), (m, s)) in scaled.iter_mut().zip(features.0).zip(params) {
                    *out = (x - m) / s;
                }
            }
            Scaler::MinMaxScaler { min, scale, .. } => {
                let params = min.iter().zip(scale);
                for ((out, x), (m, s)) in scaled.iter_mut().zip(features.0).zip(params) {
                    *out = x * s + m;
                }
            }
        }
        FeatureVector(scaled)
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Fitted binary logistic regression.
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    pub feature_names: Option<Vec<String>>,
}

/// A flat coefficient list, or scikit-learn's `(1, n_features)` `coef_`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// A scalar, or scikit-learn's `(1,)` `intercept_`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Vector(Vec<f64>),
}

#[derive(Deserialize)]
struct LogisticRegressionArtifact {
    #[serde(alias = "coef_")]
    coef: Coefficients,
    #[serde(alias = "intercept_")]
    intercept: Intercept,
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    LogisticRegression(LogisticRegressionArtifact),
}

impl TryFrom<LogisticRegressionArtifact> for LogisticRegression {
    type Error = ArtifactError;

    fn try_from(artifact: LogisticRegressionArtifact) -> Result<Self, Self::Error> {
        let coef = match artifact.coef {
            Coefficients::Flat(coef) => coef,
            Coefficients::Rows(mut rows) => {
                if rows.len() != 1 {
                    return Err(ArtifactError::CoefficientRows { rows: rows.len() });
                }
                rows.remove(0)
            }
        };
        let intercept = match artifact.intercept {
            Intercept::Scalar(intercept) => intercept,
            Intercept::Vector(values) => match values.as_slice() {
                [intercept] => *intercept,
                _ => {
                    return Err(ArtifactError::ParameterLength {
                        artifact: Self::ARTIFACT,
                        parameter: "intercept",
                        expected: 1,
                        found: values.len(),
                    })
                }
            },
        };
        let model = LogisticRegression {
            coef,
            intercept,
            feature_names: artifact.feature_names,
        };
        model.validate()?;
        Ok(model)
    }
}

impl LogisticRegression {
    const ARTIFACT: &'static str = "classifier";

    fn validate(&self) -> Result<(), ArtifactError> {
        check_feature_count(Self::ARTIFACT, self.coef.len())?;
        check_finite(Self::ARTIFACT, "coef", &self.coef)?;
        check_finite(Self::ARTIFACT, "intercept", &[self.intercept])
    }

    /// `intercept + coef . x`
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coef
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |z, (w, x)| z + w * x)
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn threshold(&self) -> f64 {
        0.5
    }

    fn predict_proba(&self, features: &FeatureVector) -> [f64; 2] {
        let p = sigmoid(self.decision_function(features));
        [1.0 - p, p]
    }
}

/// Classifier artifact, tagged by `kind`.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassifierModel {
    LogisticRegression(LogisticRegression),
}

impl ClassifierModel {
    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        let artifact: ClassifierArtifact =
            serde_json::from_str(text).map_err(|source| ArtifactError::Parse {
                artifact: LogisticRegression::ARTIFACT,
                source,
            })?;
        match artifact {
            ClassifierArtifact::LogisticRegression(raw) => Ok(ClassifierModel::LogisticRegression(
                LogisticRegression::try_from(raw)?,
            )),
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            ClassifierModel::LogisticRegression(inner) => inner,
        }
    }
}

impl Classifier for ClassifierModel {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.inner().feature_names()
    }

    fn threshold(&self) -> f64 {
        self.inner().threshold()
    }

    fn predict_proba(&self, features: &FeatureVector) -> [f64; 2] {
        self.inner().predict_proba(features)
    }
}
