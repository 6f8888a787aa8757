use twine_scraper::pipeline::processing::dedup::Deduplicator;
use twine_scraper::pipeline::{CleaningPipeline, RejectionReason};
use twine_scraper::types::RawProfile;

fn record(name: &str, email: &str, link: &str) -> RawProfile {
    RawProfile::new(name, email, link, "UGC Creator")
}

#[test]
fn test_documented_cases_end_in_the_expected_state() {
    let pipeline = CleaningPipeline::new();
    let batch = vec![
        record(
            "John Smith",
            "john.smith@gmail.com",
            "https://www.twine.net/profile/john-smith-1",
        ),
        record(
            "Creative Media Studio",
            "contact@studio.com",
            "https://www.twine.net/profile/studio-1",
        ),
        record("Test User", "test@test.com", "https://www.twine.net/profile/test-3"),
        record("Ava Hill", "a@b.com", "https://www.twine.net/profile/ava-hill-10"),
        record("Owen Hall", "a@b.com", "https://www.twine.net/profile/owen-hall-11"),
        record("Grace Lee", "not-an-email", "https://www.twine.net/profile/grace-lee-12"),
        record("Lily Young", "lily.young@yahoo.com", "https://twine.net/x"),
    ];

    let outcome = pipeline.clean(&batch);

    let names: Vec<&str> = outcome.accepted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["John Smith", "Ava Hill"]);

    let stats = &outcome.stats;
    assert_eq!(stats.total_input, 7);
    assert_eq!(stats.accepted, 2);
    assert_eq!(stats.count(RejectionReason::BrandName), 1);
    assert_eq!(stats.count(RejectionReason::TestData), 1);
    assert_eq!(stats.count(RejectionReason::Duplicate), 1);
    assert_eq!(stats.count(RejectionReason::InvalidEmail), 1);
    assert_eq!(stats.count(RejectionReason::InvalidUrl), 1);
    assert_eq!(stats.accepted + stats.rejected(), stats.total_input);
}

#[test]
fn test_rejected_records_do_not_claim_their_email() {
    let pipeline = CleaningPipeline::new();
    // First copy fails the URL gate, so the second copy is still eligible
    let batch = vec![
        record("Ava Hill", "ava.hill@gmail.com", "https://twine.net/x"),
        record(
            "Ava Hill",
            "ava.hill@gmail.com",
            "https://www.twine.net/profile/ava-hill-1",
        ),
    ];

    let outcome = pipeline.clean(&batch);
    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.stats.invalid_url, 1);
    assert_eq!(outcome.stats.duplicate, 0);
}

#[test]
fn test_first_failing_gate_decides_the_reason() {
    let pipeline = CleaningPipeline::new();
    let mut dedup = Deduplicator::new();
    dedup.record("taken@gmail.com");

    // Fails every gate; duplicate is checked first
    let everything_wrong = record("The Studio", "taken@gmail.com", "short");
    let outcome = pipeline.clean_with(&[everything_wrong], &mut dedup);
    assert_eq!(outcome.stats.duplicate, 1);

    // Brand name and test email both fail; brand gate runs first
    let brand_and_test = record(
        "Demo Media",
        "demo@gmail.com",
        "https://www.twine.net/profile/demo-media-1",
    );
    let outcome = pipeline.clean(&[brand_and_test]);
    assert_eq!(outcome.stats.brand_name, 1);
    assert_eq!(outcome.stats.test_data, 0);
}

#[test]
fn test_missing_fields_are_rejected_not_panicking() {
    let pipeline = CleaningPipeline::new();
    let outcome = pipeline.clean(&[RawProfile::default()]);
    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.stats.invalid_email, 1);
}

#[test]
fn test_cleaning_is_deterministic() {
    let pipeline = CleaningPipeline::new();
    let batch = vec![
        record("Ava Hill", "ava@gmail.com", "https://www.twine.net/profile/ava-hill-1"),
        record("Ava Hill", "ava@gmail.com", "https://www.twine.net/profile/ava-hill-1"),
        record("Sample", "ok@gmail.com", "https://www.twine.net/profile/sample-2"),
    ];

    let first = pipeline.clean(&batch);
    let second = pipeline.clean(&batch);
    assert_eq!(first.accepted, second.accepted);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_empty_batch() {
    let outcome = CleaningPipeline::new().clean(&[]);
    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.stats.total_input, 0);
    assert_eq!(outcome.stats.rejected(), 0);
}
