#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::models::{
        template_projects, truncate_words, validate_sequence, Credentials, JourneyExport,
        Provider, SavedProject, Step, Suggestion, SuggestionSource, MAX_LEVEL,
    };

    fn ts(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    fn chain(len: usize) -> Vec<Step> {
        let mut steps = vec![Step::root("s0", "Context: Bookstore", ts(1640995200))];
        for i in 1..len {
            let parent = steps[i - 1].clone();
            steps.push(Step::child_of(
                &parent,
                format!("s{i}"),
                format!("Step {i}"),
                ts(1640995200 + i as i64),
            ));
        }
        steps
    }

    #[test]
    fn test_child_level_is_clamped() {
        let steps = chain(6);
        let levels: Vec<u8> = steps.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 3, 3]);
        assert!(steps.iter().all(|s| s.level <= MAX_LEVEL));
        assert_eq!(steps[4].parent.as_deref(), Some("s3"));
    }

    #[test]
    fn test_validate_sequence_accepts_chain() {
        assert!(validate_sequence(&chain(5)).is_ok());
        assert!(validate_sequence(&[]).is_ok());
    }

    #[test]
    fn test_validate_sequence_rejects_forward_parent() {
        let mut steps = chain(3);
        steps[1].parent = Some("s2".to_string());
        let err = validate_sequence(&steps).unwrap_err();
        assert!(err.to_string().contains("parent"));
    }

    #[test]
    fn test_validate_sequence_rejects_duplicate_ids() {
        let mut steps = chain(3);
        steps[2].id = "s1".to_string();
        assert!(validate_sequence(&steps).is_err());
    }

    #[test]
    fn test_validate_sequence_ignores_empty_parent() {
        let mut steps = chain(2);
        steps[1].parent = Some(String::new());
        assert!(validate_sequence(&steps).is_ok());
    }

    #[test]
    fn test_step_serialization_omits_missing_parent() {
        let step = Step::root("1", "Context: App", ts(1640995200));
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("parent"));
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_step_timestamp_is_epoch_millis() {
        let raw = r#"{"id":"1712","text":"Context: Shop","level":0,"timestamp":1712000000123}"#;
        let step: Step = serde_json::from_str(raw).unwrap();
        assert_eq!(step.timestamp.as_millisecond(), 1_712_000_000_123);

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["timestamp"], 1_712_000_000_123_i64);
    }

    #[test]
    fn test_step_timestamp_round_trips_from_now() {
        let step = Step::root("1", "Context: Shop", Timestamp::now());
        let back: Step = serde_json::from_str(&serde_json::to_string(&step).unwrap()).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(
            truncate_words("one two three four five six seven eight", 6),
            "one two three four five six"
        );
        assert_eq!(truncate_words("  spaced   out  ", 6), "spaced out");
        assert_eq!(truncate_words("", 6), "");
    }

    #[test]
    fn test_generated_suggestion_truncates() {
        let suggestion = Suggestion::generated(1, "Open the app and sign in with email", 0.9);
        assert_eq!(suggestion.text, "Open the app and sign in");
        assert_eq!(suggestion.source, SuggestionSource::Generated);
        assert!(suggestion.is_generated());
        assert!(!Suggestion::fallback(1, "Configure").is_generated());
    }

    #[test]
    fn test_credentials_active_key() {
        let credentials = Credentials::new(Provider::Anthropic, "sk-ant");
        assert_eq!(credentials.active_key(), Some((Provider::Anthropic, "sk-ant")));
        assert!(credentials.has_any_key());

        let empty = Credentials::new(Provider::OpenAi, "   ");
        assert_eq!(empty.active_key(), None);
        assert!(!empty.has_any_key());
    }

    #[test]
    fn test_credentials_other_provider_key_counts_as_valid() {
        let credentials = Credentials {
            openai: Some("sk-openai".to_string()),
            anthropic: None,
            provider: Provider::Anthropic,
        };
        assert!(credentials.has_any_key());
        assert_eq!(credentials.active_key(), None);
    }

    #[test]
    fn test_credentials_wire_format() {
        let credentials = Credentials::new(Provider::OpenAi, "sk-1");
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(json, serde_json::json!({"openai": "sk-1", "provider": "openai"}));
        assert_eq!("Anthropic".parse::<Provider>(), Ok(Provider::Anthropic));
        assert!("gemini".parse::<Provider>().is_err());
    }

    #[test]
    fn test_credentials_normalized_and_masked() {
        let credentials = Credentials {
            openai: Some("  sk-123456  ".to_string()),
            anthropic: Some(" ".to_string()),
            provider: Provider::OpenAi,
        }
        .normalized();
        assert_eq!(credentials.openai.as_deref(), Some("sk-123456"));
        assert_eq!(credentials.anthropic, None);
        assert_eq!(credentials.masked_active_key().as_deref(), Some("*****3456"));
    }

    #[test]
    fn test_current_project_snapshot() {
        let steps = chain(2);
        let context = "A very long context describing an onboarding flow";
        let project = SavedProject::current(context, &steps, ts(1640995200));
        assert!(project.is_current());
        assert_eq!(project.name, "A very long context describing...");
        assert_eq!(project.steps, steps);
        assert_eq!(project.last_modified, 1640995200000);
    }

    #[test]
    fn test_template_projects() {
        let projects = template_projects(ts(1640995200));
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["E-commerce", "SaaS App", "Mobile App", "Website"]);
        assert!(projects.iter().all(|p| p.is_template && p.steps.is_empty()));
        let json = serde_json::to_value(&projects[0]).unwrap();
        assert_eq!(json["isTemplate"], true);
        assert!(json.get("lastModified").is_some());
    }

    #[test]
    fn test_export_metadata() {
        let steps = chain(3);
        let export = JourneyExport::new("Bookstore", &steps, ts(1641081600));
        assert_eq!(export.metadata.created, ts(1640995200));
        assert_eq!(export.metadata.step_count, 3);

        let empty = JourneyExport::new("Bookstore", &[], ts(1641081600));
        assert_eq!(empty.metadata.created, ts(1641081600));
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["metadata"]["stepCount"], 0);
    }
}
