// tests/lifecycle_state.rs

use process_starter::engine::{IllegalTransition, Lifecycle, SupervisorState};

#[test]
fn happy_path_walks_every_phase() {
    let mut lc = Lifecycle::new();
    assert_eq!(lc.state(), SupervisorState::Idle);

    lc.advance(SupervisorState::RunningPre).unwrap();
    lc.advance(SupervisorState::RunningConcurrent).unwrap();
    lc.advance(SupervisorState::Draining).unwrap();
    assert!(lc.begin_teardown());
    assert_eq!(lc.state(), SupervisorState::RunningPost);
    lc.finish().unwrap();
    assert_eq!(lc.state(), SupervisorState::Done);
}

#[test]
fn teardown_can_start_from_any_phase_before_post() {
    for stop_at in [
        SupervisorState::Idle,
        SupervisorState::RunningPre,
        SupervisorState::RunningConcurrent,
        SupervisorState::Draining,
    ] {
        let mut lc = Lifecycle::new();
        for next in [
            SupervisorState::RunningPre,
            SupervisorState::RunningConcurrent,
            SupervisorState::Draining,
        ] {
            if lc.state() == stop_at {
                break;
            }
            lc.advance(next).unwrap();
        }

        assert!(lc.begin_teardown(), "teardown refused from {stop_at}");
        assert_eq!(lc.state(), SupervisorState::RunningPost);
    }
}

#[test]
fn teardown_starts_exactly_once() {
    let mut lc = Lifecycle::new();
    lc.advance(SupervisorState::RunningPre).unwrap();

    assert!(lc.begin_teardown());
    assert!(!lc.begin_teardown());
    lc.finish().unwrap();
    assert!(!lc.begin_teardown());
    assert!(lc.teardown_started());
    assert_eq!(lc.state(), SupervisorState::Done);
}

#[test]
fn out_of_order_transitions_are_rejected() {
    let mut lc = Lifecycle::new();

    assert_eq!(
        lc.advance(SupervisorState::Draining),
        Err(IllegalTransition {
            from: SupervisorState::Idle,
            to: SupervisorState::Draining,
        })
    );
    assert!(lc.finish().is_err());

    lc.advance(SupervisorState::RunningPre).unwrap();
    assert!(lc.advance(SupervisorState::RunningPre).is_err());
    assert!(lc.advance(SupervisorState::RunningPost).is_err());
    assert_eq!(lc.state(), SupervisorState::RunningPre);

    lc.begin_teardown();
    assert!(lc.advance(SupervisorState::RunningConcurrent).is_err());
}
