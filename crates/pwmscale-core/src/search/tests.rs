//! Tests for the search engine.

use super::*;
use crate::note::{build_notes, Match};
use std::sync::Mutex;

/// Small space around the default clock: fine enough to hit audible notes.
fn small_space() -> SearchSpace {
    SearchSpace {
        clock_hz: 280_000_000.0,
        div_min: 0x800,
        div_max: 0x840,
        top_min: 0,
        top_max: 4095,
    }
}

/// Sequential scan in (divider, top) ascending order with strict `<`.
fn reference(target: f64, space: &SearchSpace) -> Option<Match> {
    let mut best: Option<Match> = None;
    for raw in space.dividers() {
        let divider = Divider::from_raw(raw);
        let divided = space.divided_frequency(divider);
        for top in space.tops() {
            let out = output_frequency(divided, top);
            let err = (target - out).abs();
            if best.map_or(true, |b| err < b.error_hz) {
                best = Some(Match {
                    divider,
                    top,
                    achieved_hz: out,
                    error_hz: err,
                });
            }
        }
    }
    best
}

fn run(
    notes: &mut [Note],
    space: &SearchSpace,
    strategy: SearchStrategy,
    threads: Option<usize>,
) {
    let options = SearchOptions {
        strategy,
        threads,
        progress: None,
    };
    search(notes, space, &options).unwrap();
}

#[test]
fn test_exhaustive_matches_sequential_reference() {
    let space = small_space();
    let mut notes = build_notes(-24, 2);
    run(&mut notes, &space, SearchStrategy::Exhaustive, Some(4));

    for note in &notes {
        let expected = reference(note.target_hz, &space);
        assert_eq!(note.best, expected, "note {}", note.index);
    }
}

#[test]
fn test_bracketed_matches_exhaustive() {
    let space = small_space();
    let mut exhaustive = build_notes(-36, 3);
    let mut bracketed = exhaustive.clone();
    run(&mut exhaustive, &space, SearchStrategy::Exhaustive, None);
    run(&mut bracketed, &space, SearchStrategy::Bracketed, None);
    assert_eq!(exhaustive, bracketed);
}

#[test]
fn test_bracketed_handles_targets_outside_top_range() {
    // Outputs span roughly 1 kHz to 300 kHz: the first note is below, the second above.
    let space = SearchSpace {
        clock_hz: 300_000.0,
        div_min: 16,
        div_max: 18,
        top_min: 0,
        top_max: 255,
    };
    let mut notes = vec![Note::new(0, -48), Note::new(1, 119)];
    let mut expected = notes.clone();
    run(&mut notes, &space, SearchStrategy::Bracketed, None);
    run(&mut expected, &space, SearchStrategy::Exhaustive, None);
    assert_eq!(notes, expected);
    assert_eq!(notes[0].best.unwrap().top, 255);
    assert_eq!(notes[1].best.unwrap().top, 0);
}

#[test]
fn test_thread_count_does_not_change_result() {
    let space = small_space();
    let mut single = build_notes(-24, 1);
    let mut many = single.clone();
    run(&mut single, &space, SearchStrategy::Exhaustive, Some(1));
    run(&mut many, &space, SearchStrategy::Exhaustive, Some(8));
    assert_eq!(single, many);
}

#[test]
fn test_tie_resolves_to_smallest_pair() {
    // Divider 16 and 32 at clock 1000 Hz: (16, 1) and (32, 0) both give 500 Hz.
    let space = SearchSpace {
        clock_hz: 1000.0,
        div_min: 16,
        div_max: 32,
        top_min: 0,
        top_max: 3,
    };
    let mut notes = vec![Note {
        index: 0,
        offset: 0,
        target_hz: 500.0,
        best: None,
    }];
    run(&mut notes, &space, SearchStrategy::Exhaustive, Some(3));
    let best = notes[0].best.unwrap();
    assert_eq!(best.error_hz, 0.0);
    assert_eq!((best.divider.raw(), best.top), (16, 1));
}

#[test]
fn test_empty_space_leaves_sentinels() {
    let space = SearchSpace {
        div_min: 0x100,
        div_max: 0x0ff,
        ..small_space()
    };
    assert!(space.is_empty());
    let mut notes = build_notes(-24, 1);
    run(&mut notes, &space, SearchStrategy::Exhaustive, None);
    assert!(notes.iter().all(|n| n.best.is_none()));
    run(&mut notes, &space, SearchStrategy::Bracketed, None);
    assert!(notes.iter().all(|n| n.best.is_none()));
}

#[test]
fn test_unreachable_target_stays_unmatched() {
    // 440 * 2^(20000 / 12) is infinite, so every candidate error is too.
    let mut notes = vec![Note::new(0, 20_000), Note::new(1, -24)];
    assert!(notes[0].target_hz.is_infinite());
    for strategy in [SearchStrategy::Exhaustive, SearchStrategy::Bracketed] {
        run(&mut notes, &small_space(), strategy, None);
        assert!(notes[0].best.is_none());
        assert!(notes[1].best.is_some());
    }
}

#[test]
fn test_search_keeps_better_existing_match() {
    let space = small_space();
    let mut notes = build_notes(-24, 1);
    let perfect = Match {
        divider: Divider::from_raw(0xfff),
        top: 0xffff,
        achieved_hz: notes[0].target_hz,
        error_hz: 0.0,
    };
    notes[0].best = Some(perfect);
    run(&mut notes, &space, SearchStrategy::Exhaustive, None);
    assert_eq!(notes[0].best, Some(perfect));
    assert!(notes[1].best.is_some());
}

#[test]
fn test_progress_reports_every_divider() {
    let space = small_space();
    let seen = Mutex::new(Vec::new());
    let observer = |p: SearchProgress| seen.lock().unwrap().push(p);
    let options = SearchOptions {
        strategy: SearchStrategy::Bracketed,
        threads: Some(2),
        progress: Some(&observer),
    };
    let mut notes = build_notes(-24, 1);
    search(&mut notes, &space, &options).unwrap();

    let mut seen = seen.into_inner().unwrap();
    seen.sort_by_key(|p| p.completed);
    assert_eq!(seen.len() as u32, space.divider_count());
    assert!(seen.iter().all(|p| p.total == space.divider_count()));
    assert_eq!(seen.last().unwrap().fraction(), 1.0);
}

#[test]
fn test_space_counts() {
    let space = small_space();
    assert_eq!(space.divider_count(), 0x41);
    assert_eq!(space.top_count(), 4096);
    assert_eq!(space.candidate_count(), 0x41 * 4096);
}

#[test]
fn test_space_validate_rejects_empty_ranges() {
    assert!(small_space().validate().is_ok());

    let no_dividers = SearchSpace {
        div_min: 0x100,
        div_max: 0x0ff,
        ..small_space()
    };
    assert_eq!(no_dividers.validate().unwrap_err().code(), "PWM_001");

    let no_tops = SearchSpace {
        top_min: 10,
        top_max: 9,
        ..small_space()
    };
    assert_eq!(no_tops.validate().unwrap_err().code(), "PWM_002");
}

#[test]
fn test_strategy_parse() {
    assert_eq!("exhaustive".parse::<SearchStrategy>(), Ok(SearchStrategy::Exhaustive));
    assert_eq!("bracketed".parse::<SearchStrategy>(), Ok(SearchStrategy::Bracketed));
    assert!("fast".parse::<SearchStrategy>().is_err());
    assert_eq!(SearchStrategy::default().to_string(), "exhaustive");
}
