use crate::types::PredictionResult;

/// Display string for a scored submission.
pub fn render(result: &PredictionResult) -> String {
    let headline = if result.label == 1 {
        "⚠️ High Risk of Default"
    } else {
        "✅ Low Risk of Default"
    };
    format!(
        "{}\n\nProbability: {:.2}%",
        headline,
        result.probability * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_risk_verdict() {
        let text = render(&PredictionResult {
            label: 1,
            probability: 0.8731,
        });
        assert_eq!(text, "⚠️ High Risk of Default\n\nProbability: 87.31%");
    }

    #[test]
    fn low_risk_verdict_keeps_two_decimals() {
        let text = render(&PredictionResult {
            label: 0,
            probability: 0.05,
        });
        assert_eq!(text, "✅ Low Risk of Default\n\nProbability: 5.00%");
    }
}
