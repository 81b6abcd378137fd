use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::diagnostics::Diagnostics;
use crate::history::History;
use crate::variant::Memory;

fn push(history: &mut History, memory: Memory, diagnostics: &mut Diagnostics, x_val: f64, g_val: f64) {
    let outer_iter = history.iter();
    let x = Array1::from_elem(2, x_val);
    let g = Array1::from_elem(2, g_val);
    history.update(&g, &x, memory, outer_iter, diagnostics);
}

#[test]
fn init_phase_captures_previous_triple_without_incrementing_iter() {
    let mut history = History::new(2, 3);
    let mut diagnostics = Diagnostics::new(false);
    assert!(history.is_init_phase());

    push(&mut history, Memory::Rolling, &mut diagnostics, 1.0, 1.0);

    assert!(!history.is_init_phase());
    assert_eq!(history.iter(), 0);
    assert_eq!(history.valid_cols(), 0);
}

#[test]
fn rolling_wrap_matches_worked_trace() {
    let mut history = History::new(2, 3);
    let mut diagnostics = Diagnostics::new(true);

    push(&mut history, Memory::Rolling, &mut diagnostics, 1.0, 1.0); // init phase

    let expected_iter = [1, 2, 3, 4, 5, 6, 7];
    let expected_valid = [1, 2, 3, 3, 3, 3, 3];

    for (k, (&exp_iter, &exp_valid)) in expected_iter.iter().zip(expected_valid.iter()).enumerate() {
        push(&mut history, Memory::Rolling, &mut diagnostics, 1.0 + k as f64, 1.0);
        assert_eq!(history.iter(), exp_iter);
        assert_eq!(history.valid_cols(), exp_valid);
    }

    assert!(diagnostics.restarts().is_empty(), "rolling memory never restarts");
}

#[test]
fn restarted_wrap_logs_two_restarts_over_seven_updates() {
    let mut history = History::new(2, 3);
    let mut diagnostics = Diagnostics::new(true);

    push(&mut history, Memory::Restarted, &mut diagnostics, 1.0, 1.0); // init phase

    for k in 0..7 {
        push(&mut history, Memory::Restarted, &mut diagnostics, 1.0 + k as f64, 1.0);
    }

    assert_eq!(diagnostics.restarts().len(), 2);
    // Both restarts fire at the 4th and 7th post-init call (internal iter == 3 at each wrap);
    // after the final call's body completes, iter has been reset and incremented back to 1.
    assert_eq!(history.iter(), 1);
}

#[test]
fn delta_columns_are_internally_consistent() {
    let mut history = History::new(3, 4);
    let mut diagnostics = Diagnostics::new(false);
    let mut rng = SmallRng::seed_from_u64(7);

    for k in 0..6u32 {
        let x = Array1::from_shape_fn(3, |_| rng.random_range(-1.0..1.0) + k as f64);
        let g = Array1::from_shape_fn(3, |_| rng.random_range(-1.0..1.0) + 0.5 * k as f64);
        history.update(&g, &x, Memory::Rolling, k as usize, &mut diagnostics);
    }

    let l = history.valid_cols();
    assert!(l >= 3);
    let x_cols = history.x_cols(l).to_owned();
    let g_cols = history.g_cols(l).to_owned();
    let f_cols = history.f_cols(l).to_owned();

    for j in 0..l {
        for i in 0..3 {
            let expected = x_cols[[i, j]] - g_cols[[i, j]];
            assert!((f_cols[[i, j]] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn empty_history_resets_everything() {
    let mut history = History::new(2, 3);
    let mut diagnostics = Diagnostics::new(false);

    for k in 0..5u32 {
        push(&mut history, Memory::Rolling, &mut diagnostics, k as f64, 0.5 * k as f64);
    }
    assert!(history.iter() > 0);

    history.empty_history();

    assert_eq!(history.iter(), 0);
    assert!(history.is_init_phase());
    assert_eq!(history.valid_cols(), 0);
}
