//! Tests for PathSearcher, checked against brute-force enumeration

use rstest::rstest;

use pyrpath::domain::{
    NodeId, PathSearcher, Pyramid, PyramidBuilder, SearchStatus, TraceEvent,
};
use pyrpath::util::testing;

fn build(rows: &[Vec<f64>]) -> Pyramid {
    PyramidBuilder::new().build(rows).unwrap()
}

fn sample() -> Vec<Vec<f64>> {
    vec![vec![1.0], vec![2.0, 3.0], vec![1.0, 6.0, 2.0]]
}

/// Deterministic pyramid with small repeating values so products collide.
fn generated(height: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut state = seed;
    (0..height)
        .map(|i| {
            (0..=i)
                .map(|_| {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    ((state >> 33) % 4 + 1) as f64
                })
                .collect()
        })
        .collect()
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn given_unreachable_target_when_searching_then_exhausts_every_leaf() {
    testing::init_test_setup();
    let pyramid = build(&sample());

    let outcome = PathSearcher::new(&pyramid).search_from_root(7.0).unwrap();

    assert!(!outcome.found());
    assert_eq!(outcome.status, SearchStatus::Exhausted);
    assert!(outcome.path.is_empty());
    assert_eq!(
        outcome.trace.tokens(),
        vec![
            "00", "10", "BAD", "20", "10", "BAD", "21", "10", "00", "11", "BAD", "21", "11",
            "BAD", "22", "11", "00"
        ]
    );
    assert_eq!(outcome.trace.last_marker(), Some(TraceEvent::Bad));
}

#[test]
fn given_target_on_last_leaf_when_searching_then_finds_rightmost_path() {
    let pyramid = build(&sample());

    let outcome = PathSearcher::new(&pyramid).search_from_root(6.0).unwrap();

    assert!(outcome.found());
    let values: Vec<f64> = outcome.root_first_path().iter().map(|n| n.value).collect();
    assert_eq!(values, vec![1.0, 3.0, 2.0]);
    assert_eq!(outcome.directions(), "RR");
    assert_eq!(
        outcome.trace.tokens(),
        vec![
            "00", "10", "BAD", "20", "10", "BAD", "21", "10", "00", "11", "BAD", "21", "11",
            "GOOD", "22", "11", "00"
        ]
    );
}

#[test]
fn given_found_path_when_reading_raw_then_order_is_leaf_to_root() {
    let pyramid = build(&sample());

    let outcome = PathSearcher::new(&pyramid).search_from_root(6.0).unwrap();

    let ids: Vec<NodeId> = outcome.path.iter().map(|n| n.id).collect();
    assert_eq!(
        ids,
        vec![NodeId::new(2, 2), NodeId::new(1, 1), NodeId::new(0, 0)]
    );
}

#[test]
fn given_single_row_matching_when_searching_then_trace_is_good_root() {
    let pyramid = build(&[vec![5.0]]);

    let outcome = PathSearcher::new(&pyramid).search_from_root(5.0).unwrap();

    assert!(outcome.found());
    assert_eq!(outcome.path.len(), 1);
    assert_eq!(outcome.path[0].value, 5.0);
    assert_eq!(outcome.trace.tokens(), vec!["GOOD", "00"]);
    assert_eq!(outcome.directions(), "");
}

#[test]
fn given_single_row_mismatch_when_searching_then_trace_is_bad_root() {
    let pyramid = build(&[vec![5.0]]);

    let outcome = PathSearcher::new(&pyramid).search_from_root(3.0).unwrap();

    assert!(!outcome.found());
    assert_eq!(outcome.trace.tokens(), vec!["BAD", "00"]);
}

#[test]
fn given_empty_pyramid_when_searching_then_reports_missing_root() {
    let pyramid = build(&[]);

    let outcome = PathSearcher::new(&pyramid).search_from_root(1.0).unwrap();

    assert_eq!(outcome.status, SearchStatus::MissingRoot);
    assert!(!outcome.found());
    assert!(outcome.trace.is_empty());
}

// ============================================================
// Properties
// ============================================================

#[rstest]
#[case(1, 7)]
#[case(2, 11)]
#[case(3, 23)]
#[case(4, 42)]
#[case(5, 99)]
#[case(6, 1234)]
fn given_generated_pyramid_when_searching_every_target_then_agrees_with_brute_force(
    #[case] height: usize,
    #[case] seed: u64,
) {
    let pyramid = build(&generated(height, seed));
    let routes = pyramid.leaf_paths();
    assert_eq!(routes.len(), 1 << (height - 1));

    let products: Vec<f64> = routes
        .iter()
        .map(|r| r.iter().map(|n| n.value).product())
        .collect();
    let mut targets = products.clone();
    targets.extend([0.0, 5.5, 1e9]);

    for target in targets {
        let outcome = PathSearcher::new(&pyramid).search_from_root(target).unwrap();
        let first_match = products.iter().position(|&p| p == target);

        assert_eq!(outcome.found(), first_match.is_some(), "target {}", target);
        assert!(outcome.trace.is_well_formed());
        assert!(outcome.trace.markers().count() >= 1);
        assert_eq!(
            outcome.trace.last_marker() == Some(TraceEvent::Good),
            outcome.found()
        );

        if let Some(idx) = first_match {
            // Left preference: the first route in L-before-R order wins
            let expected: Vec<NodeId> = routes[idx].iter().map(|n| n.id).collect();
            let actual: Vec<NodeId> = outcome.root_first_path().iter().map(|n| n.id).collect();
            assert_eq!(actual, expected);
            assert_eq!(actual.len(), pyramid.height());
            assert_eq!(outcome.product(), Some(target));
        }
    }
}

#[test]
fn given_two_matching_leaves_when_searching_then_left_turns_win() {
    // LL, LR and RR all multiply to 6
    let pyramid = build(&[vec![1.0], vec![2.0, 3.0], vec![3.0, 3.0, 2.0]]);

    let outcome = PathSearcher::new(&pyramid).search_from_root(6.0).unwrap();

    assert_eq!(outcome.directions(), "LL");
    assert!(!outcome.trace.tokens().contains(&"11".to_string()));
}

#[test]
fn given_identical_inputs_when_searching_twice_then_outcomes_are_equal() {
    let pyramid = build(&generated(5, 3));
    let searcher = PathSearcher::new(&pyramid);

    let first = searcher.search_from_root(8.0).unwrap();
    let second = searcher.search_from_root(8.0).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_tall_pyramid_when_searching_then_does_not_exhaust_the_stack() {
    let height = 1_000;
    let rows: Vec<Vec<f64>> = (0..height).map(|i| vec![1.0; i + 1]).collect();
    let pyramid = build(&rows);

    let outcome = PathSearcher::new(&pyramid).search_from_root(1.0).unwrap();

    assert!(outcome.found());
    assert_eq!(outcome.path.len(), height);
    assert_eq!(outcome.directions(), "L".repeat(height - 1));
    // One entry per inner node on the way down and back up, plus GOOD and the leaf
    assert_eq!(outcome.trace.len(), 2 * (height - 1) + 2);
}

#[test]
fn given_more_than_ten_rows_when_tracing_then_ids_use_separator() {
    let rows: Vec<Vec<f64>> = (0..12).map(|i| vec![1.0; i + 1]).collect();
    let pyramid = build(&rows);

    let outcome = PathSearcher::new(&pyramid).search_from_root(1.0).unwrap();

    let tokens = outcome.trace.tokens();
    assert_eq!(tokens.first().map(String::as_str), Some("00"));
    assert!(tokens.contains(&"10:0".to_string()));
    assert!(tokens.contains(&"11:0".to_string()));
    assert!(tokens.contains(&"10".to_string()));
}

#[test]
fn given_inner_start_when_searching_then_seeds_product_with_start_value() {
    let pyramid = build(&sample());

    // From 11 (value 3): 3*6=18, 3*2=6
    let outcome = PathSearcher::new(&pyramid)
        .search(NodeId::new(1, 1), 18.0)
        .unwrap();

    assert!(outcome.found());
    assert_eq!(outcome.trace.tokens(), vec!["11", "GOOD", "21", "11"]);
}
