use crate::activation::ActivationGate;
use crate::variant::Activation;

#[test]
fn immediate_fires_once_iter_reaches_two() {
    let mut gate = ActivationGate::new(Activation::Immediate);
    gate.check_iteration(0);
    assert!(!gate.is_active());
    gate.check_iteration(1);
    assert!(!gate.is_active());
    gate.check_iteration(2);
    assert!(gate.is_active());
}

#[test]
fn by_iteration_latches_at_start_iter() {
    let mut gate = ActivationGate::new(Activation::ByIteration { start_iter: 5 });
    for iter in [2, 3, 4] {
        gate.check_iteration(iter);
        assert!(!gate.is_active(), "should not activate before start_iter");
    }
    gate.check_iteration(5);
    assert!(gate.is_active());

    // Latching: further calls, even with iter below start_iter, never clear it.
    gate.check_iteration(0);
    assert!(gate.is_active());
}

#[test]
fn by_accuracy_requires_both_residuals_under_tolerance() {
    let mut gate = ActivationGate::new(Activation::ByAccuracy { epsilon: 1e-3 });
    gate.check_residual(1.0, 1e-6, 0.0, 0.0);
    assert!(!gate.is_active());
    gate.check_residual(1e-6, 1e-6, 0.0, 0.0);
    assert!(gate.is_active());
}

#[test]
fn calls_with_the_wrong_signature_for_the_policy_are_no_ops() {
    let mut gate = ActivationGate::new(Activation::ByAccuracy { epsilon: 1e-3 });
    gate.check_iteration(1_000_000);
    assert!(!gate.is_active());

    let mut gate = ActivationGate::new(Activation::ByIteration { start_iter: 2 });
    gate.check_residual(0.0, 0.0, 0.0, 0.0);
    assert!(!gate.is_active());
}

#[test]
fn by_iteration_or_accuracy_is_the_union_of_both_conditions() {
    let mut by_iter = ActivationGate::new(Activation::ByIterationOrAccuracy {
        epsilon: 1e-3,
        start_iter: 10,
    });
    by_iter.check_iteration(10);
    assert!(by_iter.is_active());

    let mut by_acc = ActivationGate::new(Activation::ByIterationOrAccuracy {
        epsilon: 1e-3,
        start_iter: 10,
    });
    by_acc.check_residual(1e-6, 1e-6, 0.0, 0.0);
    assert!(by_acc.is_active());
}
