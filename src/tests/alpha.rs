use ndarray::{array, Array1};

use crate::alpha::recover;

#[test]
fn sums_to_one_for_multiple_entries() {
    let eta = array![0.3, -0.2, 0.5];
    let alpha = recover(eta.view());
    let sum: f64 = alpha.sum();
    assert!((sum - 1.0).abs() < 1e-12);
    assert_eq!(alpha.len(), eta.len() + 1);
}

#[test]
fn matches_hand_worked_recurrence_for_one_entry() {
    let eta = array![0.7];
    let alpha = recover(eta.view());
    assert_eq!(alpha.len(), 2);
    assert!((alpha[0] - 0.7).abs() < 1e-12);
    assert!((alpha[1] - 0.3).abs() < 1e-12);
}

#[test]
fn sums_to_one_for_zero_length_eta() {
    let eta: Array1<f64> = array![];
    let alpha = recover(eta.view());
    assert_eq!(alpha.len(), 1);
    assert!((alpha[0] - 1.0).abs() < 1e-12);
}
