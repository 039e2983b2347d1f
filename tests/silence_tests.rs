use coda_transcript::transcript::{SilenceFormatter, SilenceUnit};

fn phrase(gap: f64) -> String {
    SilenceFormatter::format(gap).to_string()
}

#[test]
fn test_seconds_round_to_five() {
    assert_eq!(phrase(47.0), "(No vocalizations, 45 seconds)");
    assert_eq!(phrase(12.0), "(No vocalizations, 10 seconds)");
    assert_eq!(phrase(10.5), "(No vocalizations, 10 seconds)");
}

#[test]
fn test_minutes() {
    assert_eq!(phrase(310.0), "(No vocalizations, 5 minutes)");
    assert_eq!(phrase(60.0), "(No vocalizations, 1 minute)");
    assert_eq!(phrase(150.0), "(No vocalizations, 2 minutes)");
    assert_eq!(phrase(1_000.0), "(No vocalizations, 15 minutes)");
}

#[test]
fn test_hours_and_days() {
    assert_eq!(phrase(3_661.0), "(No vocalizations, 1 hour)");
    assert_eq!(phrase(4.0 * 3_600.0), "(No vocalizations, 4 hours)");
    assert_eq!(phrase(7.0 * 3_600.0), "(No vocalizations, 5 hours)");
    assert_eq!(phrase(86_400.0), "(No vocalizations, 1 day)");
    assert_eq!(phrase(13.0 * 86_400.0), "(No vocalizations, 15 days)");
}

#[test]
fn test_unit_selection() {
    assert_eq!(SilenceFormatter::format(59.9).unit, SilenceUnit::Second);
    assert_eq!(SilenceFormatter::format(3_599.0).unit, SilenceUnit::Minute);
    assert_eq!(SilenceFormatter::format(86_399.0).unit, SilenceUnit::Hour);
    assert_eq!(SilenceFormatter::format(86_400.0).unit, SilenceUnit::Day);
}
