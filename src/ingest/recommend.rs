//! Recommendation generator
//!
//! Every persisted record carries a derived recommendation list: a fixed
//! base set, then severity-specific entries, then type-specific entries.
//! The order is significant and must stay stable.

use crate::models::Severity;

const BASE_RECOMMENDATIONS: [&str; 3] = [
    "Monitor for similar indicators",
    "Review security logs",
    "Update security policies as needed",
];

fn severity_recommendations(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::High => &[
            "Immediate isolation of affected systems",
            "Activate incident response team",
            "Notify relevant stakeholders",
            "Implement emergency containment measures",
        ],
        Severity::Medium => &[
            "Investigate potential impact",
            "Enhance monitoring of related systems",
            "Review access controls",
            "Consider additional security measures",
        ],
        Severity::Low => &[
            "Document for future reference",
            "Include in routine security reviews",
            "Monitor for escalation",
        ],
    }
}

fn type_recommendations(threat_type: &str) -> &'static [&'static str] {
    match threat_type {
        "phishing" => &[
            "Block sender domains",
            "Update email filtering rules",
            "Conduct phishing awareness training",
        ],
        "malware" => &[
            "Run full system scans",
            "Update antivirus signatures",
            "Isolate infected systems",
        ],
        "network" => &[
            "Review firewall rules",
            "Monitor network traffic",
            "Check for lateral movement",
        ],
        _ => &[],
    }
}

/// Generate recommendations for a threat.
///
/// Order is base, then severity-specific, then type-specific. Types without
/// a dedicated playbook (including "unknown") contribute nothing.
pub fn generate(severity: Severity, threat_type: &str) -> Vec<String> {
    let mut recommendations: Vec<String> =
        BASE_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect();

    recommendations.extend(
        severity_recommendations(severity)
            .iter()
            .map(|r| r.to_string()),
    );
    recommendations.extend(
        type_recommendations(threat_type)
            .iter()
            .map(|r| r.to_string()),
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_recommendations_always_present() {
        let recs = generate(Severity::Medium, "unknown");
        assert!(recs.len() >= 3);
        assert_eq!(recs[0], "Monitor for similar indicators");
        assert_eq!(recs[1], "Review security logs");
        assert_eq!(recs[2], "Update security policies as needed");
    }

    #[test]
    fn test_high_phishing_yields_ten_ordered_items() {
        let recs = generate(Severity::High, "phishing");
        assert_eq!(recs.len(), 10);
        // base(3) then severity(4) then type(3)
        assert_eq!(recs[3], "Immediate isolation of affected systems");
        assert_eq!(recs[6], "Implement emergency containment measures");
        assert_eq!(recs[7], "Block sender domains");
        assert_eq!(recs[9], "Conduct phishing awareness training");
    }

    #[test]
    fn test_unknown_type_contributes_nothing() {
        let recs = generate(Severity::Low, "unknown");
        assert_eq!(recs.len(), 6);
        let recs = generate(Severity::Low, "brute_force");
        assert_eq!(recs.len(), 6);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(Severity::Medium, "network");
        let b = generate(Severity::Medium, "network");
        assert_eq!(a, b);
    }

    #[test]
    fn test_severity_list_sizes() {
        assert_eq!(generate(Severity::High, "unknown").len(), 7);
        assert_eq!(generate(Severity::Medium, "unknown").len(), 7);
        assert_eq!(generate(Severity::Low, "unknown").len(), 6);
    }
}
