// libs/triage-cell/src/services/probability.rs
//
// Symptom checker scoring. Each condition carries a fixed symptom profile;
// a submission scores matched/total per condition and the headline
// prediction follows the tiered messages of the original model service.
use crate::models::{AnalysisResponse, ConditionProbability, Severity};

/// Condition profiles in declaration order. Ties on probability resolve to
/// the earlier entry, which keeps the output deterministic.
const CONDITIONS: &[(&str, &[&str])] = &[
    (
        "Heart Attack",
        &[
            "Chest Pain",
            "Shortness of Breath",
            "Racing Heart",
            "Left Arm Pain",
            "Jaw Pain",
            "Sweating",
        ],
    ),
    (
        "Gastritis",
        &[
            "Nausea",
            "Vomiting",
            "Stomach Pain",
            "Bloating",
            "Heartburn",
            "Loss of Appetite",
        ],
    ),
];

/// Below this probability a condition never becomes the headline prediction.
const PREDICTION_THRESHOLD: f64 = 30.0;

pub fn analyze(symptoms: &[String]) -> AnalysisResponse {
    let normalized: Vec<String> = symptoms
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let probabilities: Vec<ConditionProbability> = CONDITIONS
        .iter()
        .map(|(condition, profile)| {
            let probability = condition_probability(profile, &normalized);
            ConditionProbability {
                condition: condition.to_string(),
                probability,
                severity: severity_for(probability),
            }
        })
        .collect();

    let top = probabilities
        .iter()
        .reduce(|best, candidate| {
            if candidate.probability > best.probability {
                candidate
            } else {
                best
            }
        })
        .cloned();

    let prediction = prediction_for(&normalized, &probabilities);
    let severity = top.map(|t| t.severity).unwrap_or(Severity::Low);

    AnalysisResponse {
        prediction,
        probabilities,
        severity,
    }
}

fn condition_probability(profile: &[&str], normalized: &[String]) -> f64 {
    if profile.is_empty() {
        return 0.0;
    }
    let matched = profile
        .iter()
        .filter(|label| normalized.iter().any(|s| s == &label.to_lowercase()))
        .count();
    matched as f64 / profile.len() as f64 * 100.0
}

fn severity_for(probability: f64) -> Severity {
    if probability >= 70.0 {
        Severity::High
    } else if probability >= 40.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn has_all(normalized: &[String], required: &[&str]) -> bool {
    required
        .iter()
        .all(|label| normalized.iter().any(|s| s == &label.to_lowercase()))
}

fn prediction_for(normalized: &[String], probabilities: &[ConditionProbability]) -> String {
    let heart = probabilities[0].probability;
    let gastritis = probabilities[1].probability;

    if heart >= PREDICTION_THRESHOLD && heart >= gastritis {
        return match severity_for(heart) {
            Severity::High => {
                "Critical Risk: Heart Attack - Seek immediate medical attention!".to_string()
            }
            Severity::Medium => {
                "Moderate Risk: Possible Heart Issues - Consider urgent medical advice".to_string()
            }
            Severity::Low => {
                "Low Risk: Some heart-related symptoms - Monitor and consult doctor if they persist"
                    .to_string()
            }
        };
    }

    if gastritis >= PREDICTION_THRESHOLD {
        return match severity_for(gastritis) {
            Severity::High => {
                "High Likelihood: Gastritis - Consult with a healthcare provider".to_string()
            }
            Severity::Medium => {
                "Moderate Likelihood: Possible Gastritis - Consider dietary changes and medical consultation"
                    .to_string()
            }
            Severity::Low => {
                "Low Likelihood: Mild digestive issues - Monitor symptoms and avoid trigger foods"
                    .to_string()
            }
        };
    }

    // Named combinations the profiles alone cannot surface.
    if has_all(normalized, &["chest pain", "shortness of breath", "sweating"]) {
        return "High Risk: Heart Attack - Seek immediate medical attention!".to_string();
    }
    if has_all(normalized, &["stomach pain", "bloating", "heartburn"]) {
        return "Likely: Gastritis - Consult with a healthcare provider".to_string();
    }
    if has_all(normalized, &["heartburn", "regurgitation", "difficulty swallowing"]) {
        return "Likely: Acid Reflux (GERD) - Consider dietary changes and antacids".to_string();
    }
    if has_all(normalized, &["chest pain", "shortness of breath", "racing heart"]) {
        return "Possibly: Anxiety or Panic Attack - Try relaxation techniques and consider medical advice"
            .to_string();
    }
    if has_all(
        normalized,
        &["sudden shortness of breath", "chest pain", "coughing blood"],
    ) {
        return "Critical: Pulmonary Embolism - CALL EMERGENCY SERVICES IMMEDIATELY!".to_string();
    }

    "Not Conclusive: Insufficient symptoms to determine condition - Consider medical consultation"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_of_six_heart_symptoms_score_fifty_medium() {
        let result = analyze(&symptoms(&[
            "Chest Pain",
            "Shortness of Breath",
            "Racing Heart",
        ]));

        let heart = &result.probabilities[0];
        assert_eq!(heart.condition, "Heart Attack");
        assert_eq!(heart.probability, 50.0);
        assert_eq!(heart.severity, Severity::Medium);
        assert_eq!(result.severity, Severity::Medium);
    }

    #[test]
    fn full_profile_scores_one_hundred_and_reads_critical() {
        let result = analyze(&symptoms(&[
            "Chest Pain",
            "Shortness of Breath",
            "Racing Heart",
            "Left Arm Pain",
            "Jaw Pain",
            "Sweating",
        ]));

        assert_eq!(result.probabilities[0].probability, 100.0);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(
            result.prediction,
            "Critical Risk: Heart Attack - Seek immediate medical attention!"
        );
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let result = analyze(&symptoms(&["  CHEST PAIN ", "shortness of breath", "RACING heart"]));
        assert_eq!(result.probabilities[0].probability, 50.0);
    }

    #[test]
    fn equal_probabilities_resolve_to_the_first_condition() {
        // Three labels from each profile: both conditions land on 50.0.
        let result = analyze(&symptoms(&[
            "Chest Pain",
            "Left Arm Pain",
            "Jaw Pain",
            "Nausea",
            "Vomiting",
            "Bloating",
        ]));

        assert_eq!(result.probabilities[0].probability, 50.0);
        assert_eq!(result.probabilities[1].probability, 50.0);
        assert!(result.prediction.contains("Heart"));
    }

    #[test]
    fn gastritis_tier_applies_when_it_leads() {
        let result = analyze(&symptoms(&["Nausea", "Vomiting", "Stomach Pain"]));

        assert_eq!(result.probabilities[1].probability, 50.0);
        assert_eq!(
            result.prediction,
            "Moderate Likelihood: Possible Gastritis - Consider dietary changes and medical consultation"
        );
    }

    #[test]
    fn gerd_combination_is_named_below_threshold() {
        let result = analyze(&symptoms(&[
            "Heartburn",
            "Regurgitation",
            "Difficulty Swallowing",
        ]));

        assert_eq!(
            result.prediction,
            "Likely: Acid Reflux (GERD) - Consider dietary changes and antacids"
        );
    }

    #[test]
    fn pulmonary_embolism_combination_is_critical() {
        let result = analyze(&symptoms(&[
            "Sudden Shortness of Breath",
            "Chest Pain",
            "Coughing Blood",
        ]));

        assert_eq!(
            result.prediction,
            "Critical: Pulmonary Embolism - CALL EMERGENCY SERVICES IMMEDIATELY!"
        );
    }

    #[test]
    fn unmatched_symptoms_are_not_conclusive() {
        let result = analyze(&symptoms(&["Itchy Skin"]));

        assert_eq!(result.probabilities[0].probability, 0.0);
        assert_eq!(result.probabilities[1].probability, 0.0);
        assert_eq!(result.severity, Severity::Low);
        assert_eq!(
            result.prediction,
            "Not Conclusive: Insufficient symptoms to determine condition - Consider medical consultation"
        );
    }

    #[test]
    fn severity_bands_sit_at_seventy_and_forty() {
        assert_eq!(severity_for(70.0), Severity::High);
        assert_eq!(severity_for(69.9), Severity::Medium);
        assert_eq!(severity_for(40.0), Severity::Medium);
        assert_eq!(severity_for(39.9), Severity::Low);
    }
}
