use sansure::llm::prompts::{
    collusion_prompt, health_narrative_prompt, investor_signal_prompt, vision_prompt,
    COLLUSION_SLOTS, MISSING_SUBMISSION, NARRATIVE_BANNED_WORDS,
};
use sansure::models::{
    Checklist, CollusionRequest, HealthNarrativeRequest, InvestorSignalRequest, Submission,
};

fn submission(id: &str, submitter_type: &str, score: i64) -> Submission {
    Submission {
        id: id.to_string(),
        facility_id: "FAC-7".to_string(),
        submitter_type: submitter_type.to_string(),
        score,
        checklist: Checklist {
            door: true,
            water: false,
            clean: true,
            toilet: true,
        },
        features: vec!["door".to_string(), "tap".to_string()],
        discrepancies: vec![],
    }
}

#[test]
fn test_vision_prompt_reflects_checklist() {
    let prompt = vision_prompt(&Checklist {
        door: false,
        water: true,
        clean: false,
        toilet: true,
    });

    assert!(prompt.contains("Door present: no"));
    assert!(prompt.contains("Water available: yes"));
    assert!(prompt.contains("Clean floor: no"));
    assert!(prompt.contains("Toilet clearly visible: yes"));
    assert!(prompt.contains("\"spoofing_risk\""));
}

#[test]
fn test_collusion_prompt_renders_slots_in_order() {
    let req = CollusionRequest {
        submissions: vec![
            submission("a", "household", 88),
            submission("b", "peer", 52),
            submission("c", "auditor", 40),
        ],
    };
    let prompt = collusion_prompt(&req);

    let positions: Vec<usize> = COLLUSION_SLOTS
        .iter()
        .map(|slot| prompt.find(slot).expect("slot heading present"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    assert!(prompt.contains("facility FAC-7"));
    assert!(prompt.contains("Score: 88"));
    assert!(prompt.contains("Score: 52"));
    assert!(prompt.contains("Score: 40"));
    assert!(prompt.contains("door=yes, water=no, clean=yes, toilet=yes"));
    assert!(prompt.contains("Features: door, tap"));
    assert!(!prompt.contains(&format!(":\n{MISSING_SUBMISSION}")));
}

#[test]
fn test_collusion_prompt_placeholders_for_missing_parties() {
    for count in 0..3 {
        let req = CollusionRequest {
            submissions: (0..count)
                .map(|i| submission(&format!("s{i}"), "household", 70))
                .collect(),
        };
        let prompt = collusion_prompt(&req);

        assert_eq!(
            prompt.matches(&format!(":\n{MISSING_SUBMISSION}")).count(),
            3 - count,
            "with {count} submissions"
        );
        for slot in COLLUSION_SLOTS {
            assert!(prompt.contains(slot));
        }
    }
}

#[test]
fn test_collusion_prompt_without_features() {
    let mut only = submission("a", "household", 90);
    only.features.clear();
    let prompt = collusion_prompt(&CollusionRequest {
        submissions: vec![only],
    });

    assert!(prompt.contains("Features: none"));
}

#[test]
fn test_health_narrative_prompt_lists_banned_words() {
    let prompt = health_narrative_prompt(&HealthNarrativeRequest {
        village_name: "Sonpur".to_string(),
        population: 2400,
        avg_score: 74.2,
        cases_prevented: 31,
    });

    assert!(prompt.contains("community of Sonpur"));
    assert!(prompt.contains("Population: 2400 people"));
    assert!(prompt.contains("31 cases"));
    for word in NARRATIVE_BANNED_WORDS {
        assert!(prompt.contains(word), "banned word {word} not listed");
    }
}

#[test]
fn test_investor_signal_prompt_includes_statistics() {
    let prompt = investor_signal_prompt(&InvestorSignalRequest {
        village_name: "Rampur".to_string(),
        history: vec![60.0, 65.0, 70.0],
        avg: 65.0,
        std_dev: 4.08,
    });

    assert!(prompt.contains("history for Rampur"));
    assert!(prompt.contains("Scores: [60, 65, 70]"));
    assert!(prompt.contains("Average: 65"));
    assert!(prompt.contains("Standard Deviation: 4.08"));
    assert!(prompt.contains("\"30_day_forecast\""));
}
