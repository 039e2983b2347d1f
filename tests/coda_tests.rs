use coda_transcript::coda::event::{click_offsets_from_icis, tempo_class_for_duration};
use coda_transcript::coda::symbol::DecodedSymbol;
use coda_transcript::coda::{CodaEvent, RawRow, RubatoMarker, SymbolEncoder};
use coda_transcript::TranscriptError;

fn raw(duration: &str, icis: &[&str], ornament: &str, rhythm: &str) -> RawRow {
    RawRow {
        row: 4,
        recording_id: "sw061b001".to_string(),
        duration: duration.to_string(),
        icis: icis.iter().map(|s| s.to_string()).collect(),
        ornament: ornament.to_string(),
        rhythm: rhythm.to_string(),
        actor: "3".to_string(),
        start_time: "120.5".to_string(),
    }
}

#[test]
fn test_tempo_breakpoints() {
    let cases = [
        (0.44, 0),
        (0.45, 1),
        (0.60, 1),
        (0.61, 2),
        (0.92, 2),
        (0.93, 3),
        (1.07, 3),
        (1.08, 4),
        (5.0, 4),
    ];
    for (duration, class) in cases {
        assert_eq!(tempo_class_for_duration(duration), class, "duration {}", duration);
    }
}

#[test]
fn test_encode_known_tokens() {
    assert_eq!(SymbolEncoder::encode_parts(0, false, 2).unwrap().as_str(), "a3");
    assert_eq!(SymbolEncoder::encode_parts(1, true, 1).unwrap().as_str(), "B2");
    assert_eq!(SymbolEncoder::encode_parts(16, false, 4).unwrap().as_str(), "q5");
}

#[test]
fn test_encode_decode_all_categories() {
    for rhythm_class in 0..17u8 {
        for tempo_class in 0..5u8 {
            for ornamented in [false, true] {
                let first = SymbolEncoder::encode_parts(rhythm_class, ornamented, tempo_class).unwrap();
                let second = SymbolEncoder::encode_parts(rhythm_class, ornamented, tempo_class).unwrap();
                assert_eq!(first, second);
                assert_eq!(first.as_str().len(), 2);

                let decoded = SymbolEncoder::decode(first.as_str()).unwrap();
                assert_eq!(
                    decoded,
                    DecodedSymbol {
                        rhythm_class,
                        ornamented,
                        tempo_class
                    }
                );
            }
        }
    }
}

#[test]
fn test_out_of_range_category_is_rejected() {
    let err = SymbolEncoder::encode_parts(17, false, 0).unwrap_err();
    assert_eq!(
        err,
        TranscriptError::InvalidCategory {
            rhythm_class: 17,
            tempo_class: 0
        }
    );
    assert!(SymbolEncoder::encode_parts(3, true, 5).is_err());
    assert!(CodaEvent::new("sw", 1, 0.0, vec![0.0], 2, false, 7).is_err());
}

#[test]
fn test_decode_rejects_foreign_tokens() {
    assert!(SymbolEncoder::decode("").is_none());
    assert!(SymbolEncoder::decode("z1").is_none());
    assert!(SymbolEncoder::decode("a0").is_none());
    assert!(SymbolEncoder::decode("a6").is_none());
    assert!(SymbolEncoder::decode("/a3").is_none());
}

#[test]
fn test_rubato_prefix() {
    let symbol = SymbolEncoder::encode_parts(2, false, 0).unwrap();
    assert_eq!(symbol.with_rubato(None), "c1");
    assert_eq!(symbol.with_rubato(Some(RubatoMarker::Increasing)), "/c1");
    assert_eq!(symbol.with_rubato(Some(RubatoMarker::Constant)), "-c1");
    assert_eq!(symbol.with_rubato(Some(RubatoMarker::Decreasing)), "\\c1");
}

#[test]
fn test_noise_intervals_are_not_clicks() {
    let offsets = click_offsets_from_icis(&[0.1, 0.0001, 0.1, 0.0, 0.5], 0.0002);
    assert_eq!(offsets.len(), 3);
    assert_eq!(offsets[0], 0.0);
    assert!((offsets[1] - 0.1).abs() < 1e-12);
    // The noise interval still counts toward elapsed time.
    assert!((offsets[2] - 0.2001).abs() < 1e-12);
}

#[test]
fn test_event_from_raw_row() {
    let event = CodaEvent::from_raw(&raw("0.5", &["0.2", "0.3", "0"], "1", "4.0"), 0.0002).unwrap();
    assert_eq!(event.actor_id, 3);
    assert_eq!(event.start_time, 120.5);
    assert_eq!(event.rhythm_class, 4);
    assert_eq!(event.tempo_class, 1);
    assert!(event.ornamented);
    assert_eq!(event.click_offsets().len(), 3);
    assert_eq!(SymbolEncoder::encode(&event).unwrap().as_str(), "E2");
    // Ornamented: the last click is ignored.
    assert!((event.ornament_free_duration() - 0.2).abs() < 1e-12);
}

#[test]
fn test_malformed_field_is_named() {
    let err = CodaEvent::from_raw(&raw("abc", &["0.2"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "Duration", "abc"));

    let err = CodaEvent::from_raw(&raw("0.3", &["0.2", "x"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "ICI2", "x"));

    let err = CodaEvent::from_raw(&raw("0.3", &["0.2"], "maybe", "1"), 0.0002).unwrap_err();
    assert!(matches!(err, TranscriptError::MalformedRow { .. }));
}

#[test]
fn test_rhythm_out_of_range_in_row() {
    let err = CodaEvent::from_raw(&raw("0.3", &["0.2"], "0", "17"), 0.0002).unwrap_err();
    assert_eq!(
        err,
        TranscriptError::InvalidCategory {
            rhythm_class: 17,
            tempo_class: 0
        }
    );
}

#[test]
fn test_rhythm_outside_byte_range_is_malformed() {
    let err = CodaEvent::from_raw(&raw("0.3", &["0.2"], "0", "300"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "Rhythm", "300"));

    let err = CodaEvent::from_raw(&raw("0.3", &["0.2"], "0", "-1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "Rhythm", "-1"));
}

#[test]
fn test_non_finite_or_negative_spans_are_malformed() {
    let err = CodaEvent::from_raw(&raw("0.3", &["0.1", "NaN"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "ICI2", "NaN"));

    let err = CodaEvent::from_raw(&raw("0.3", &["0.1", "inf"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "ICI2", "inf"));

    let err = CodaEvent::from_raw(&raw("0.3", &["-0.3"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "ICI1", "-0.3"));

    let err = CodaEvent::from_raw(&raw("NaN", &["0.2"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "Duration", "NaN"));

    let err = CodaEvent::from_raw(&raw("-1", &["0.2"], "0", "1"), 0.0002).unwrap_err();
    assert_eq!(err, TranscriptError::malformed(4, "Duration", "-1"));
}

#[test]
fn test_constructor_rejects_bad_offsets() {
    let err = CodaEvent::new("sw", 1, 0.0, vec![0.5, 0.5001, 0.2], 0, false, 0).unwrap_err();
    assert!(matches!(err, TranscriptError::InvalidClickOffsets { .. }));

    let err = CodaEvent::new("sw", 1, 0.0, vec![0.0, 0.3, 0.2], 0, false, 0).unwrap_err();
    assert_eq!(
        err,
        TranscriptError::InvalidClickOffsets {
            recording_id: "sw".to_string(),
            offsets: vec![0.0, 0.3, 0.2],
        }
    );

    let err = CodaEvent::new("sw", 1, 0.0, vec![0.0, f64::NAN], 0, false, 0).unwrap_err();
    assert!(matches!(err, TranscriptError::InvalidClickOffsets { .. }));
}

#[test]
fn test_constructor_drops_noise_clicks() {
    let event = CodaEvent::new("sw", 1, 0.0, vec![0.0, 0.1, 0.10005, 0.2], 0, false, 0).unwrap();
    assert_eq!(event.click_offsets(), &[0.0, 0.1, 0.2]);

    let event = CodaEvent::new("sw", 1, 0.0, Vec::new(), 0, false, 0).unwrap();
    assert_eq!(event.click_offsets(), &[0.0]);
}

#[test]
fn test_constructor_rejects_non_finite_start() {
    let err = CodaEvent::new("sw", 1, f64::INFINITY, vec![0.0, 0.1], 0, false, 0).unwrap_err();
    assert_eq!(
        err,
        TranscriptError::InvalidStartTime {
            recording_id: "sw".to_string(),
            start_time: f64::INFINITY,
        }
    );

    let err = CodaEvent::new("sw", 1, f64::NAN, vec![0.0, 0.1], 0, false, 0).unwrap_err();
    assert!(matches!(err, TranscriptError::InvalidStartTime { .. }));
}
