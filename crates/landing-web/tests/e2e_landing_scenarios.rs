#![forbid(unsafe_code)]

//! End-to-end landing scenarios on the deterministic host.
//!
//! A constant random unit of 0.5 gives increments of exactly 7.5, so loading
//! completes on the 14th tick (t = 2100ms), Confirming begins at 2600ms and
//! Embedded at 5600ms.
//!
//! Run:
//!   cargo test -p landing-web --test e2e_landing_scenarios

use core::time::Duration;

use landing_core::destination::{DEFAULT_DESKTOP_URL, DEFAULT_MOBILE_URL};
use landing_core::orchestrator::{CONFIRM_SUB, PROGRESS_SUB, SETTLE_SUB, VIEWPORT_SUB};
use landing_core::progress::StatusCaption;
use landing_core::view::{ConfirmationCopy, View};
use landing_core::{EmbedPermissions, LandingConfig, Orchestrator, TransitionPhase, ViewportClass};
use landing_web::{ScriptedRandom, StepProgram, XorShiftRandom, landing_program};
use pretty_assertions::assert_eq;

const COMPLETE_AT: u64 = 2100;
const CONFIRM_AT: u64 = 2600;
const EMBED_AT: u64 = 5600;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn program(width: u32) -> StepProgram<Orchestrator> {
    landing_program(LandingConfig::default(), ScriptedRandom::constant(0.5), width)
        .expect("valid config")
}

/// Advance to absolute time `t`.
fn advance_to(program: &mut StepProgram<Orchestrator>, t: u64) {
    let dt = ms(t).saturating_sub(program.now());
    program.advance_time(dt);
}

fn phase(program: &StepProgram<Orchestrator>) -> TransitionPhase {
    program.model().phase()
}

fn embedded_url(program: &StepProgram<Orchestrator>) -> Option<String> {
    match program.view() {
        Some(View::Embedded(frame)) => Some(frame.url.clone()),
        _ => None,
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_wide_viewport_embeds_desktop() {
    let mut program = program(1200);
    assert_eq!(program.model().viewport_class(), ViewportClass::Desktop);
    assert!(matches!(program.view(), Some(View::Loading(_))));

    advance_to(&mut program, COMPLETE_AT);
    assert_eq!(phase(&program), TransitionPhase::Loading);
    assert!(program.model().progress().is_complete());

    advance_to(&mut program, CONFIRM_AT);
    assert_eq!(phase(&program), TransitionPhase::Confirming);
    match program.view() {
        Some(View::Confirming(view)) => {
            assert_eq!(view.class, ViewportClass::Desktop);
            assert_eq!(view.copy, ConfirmationCopy::for_class(ViewportClass::Desktop));
        }
        other => panic!("expected confirmation view, got {other:?}"),
    }

    advance_to(&mut program, EMBED_AT);
    assert_eq!(phase(&program), TransitionPhase::Embedded);
    assert_eq!(embedded_url(&program).as_deref(), Some(DEFAULT_DESKTOP_URL));
    match program.view() {
        Some(View::Embedded(frame)) => {
            assert_eq!(frame.permissions, EmbedPermissions::GRANTED);
            assert_eq!(
                frame.permissions.sandbox_attr(),
                "allow-scripts allow-same-origin allow-popups allow-forms"
            );
        }
        other => panic!("expected embedded view, got {other:?}"),
    }
}

#[test]
fn scenario_b_narrow_viewport_embeds_mobile() {
    let mut program = program(400);
    assert_eq!(program.model().viewport_class(), ViewportClass::Mobile);

    advance_to(&mut program, CONFIRM_AT);
    match program.view() {
        Some(View::Confirming(view)) => {
            assert_eq!(view.copy, ConfirmationCopy::for_class(ViewportClass::Mobile));
        }
        other => panic!("expected confirmation view, got {other:?}"),
    }

    advance_to(&mut program, EMBED_AT);
    assert_eq!(embedded_url(&program).as_deref(), Some(DEFAULT_MOBILE_URL));
}

#[test]
fn scenario_c_resize_during_loading_last_value_wins() {
    let mut program = program(1200);
    advance_to(&mut program, 300);
    assert_eq!(phase(&program), TransitionPhase::Loading);

    let step = program.resize(400);
    assert_eq!(step.messages_processed, 1);
    assert_eq!(program.model().viewport_class(), ViewportClass::Mobile);

    advance_to(&mut program, EMBED_AT);
    assert_eq!(embedded_url(&program).as_deref(), Some(DEFAULT_MOBILE_URL));
}

#[test]
fn boundary_flips_without_hysteresis_while_confirming() {
    let mut program = program(767);
    assert_eq!(program.model().viewport_class(), ViewportClass::Mobile);
    advance_to(&mut program, CONFIRM_AT);

    program.resize(768);
    assert_eq!(program.model().viewport_class(), ViewportClass::Desktop);
    program.resize(767);
    assert_eq!(program.model().viewport_class(), ViewportClass::Mobile);
    program.resize(768);

    advance_to(&mut program, EMBED_AT);
    assert_eq!(embedded_url(&program).as_deref(), Some(DEFAULT_DESKTOP_URL));
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn transitions_happen_exactly_on_schedule() {
    let mut program = program(1200);

    advance_to(&mut program, CONFIRM_AT - 1);
    assert_eq!(phase(&program), TransitionPhase::Loading);
    advance_to(&mut program, CONFIRM_AT);
    assert_eq!(phase(&program), TransitionPhase::Confirming);

    advance_to(&mut program, EMBED_AT - 1);
    assert_eq!(phase(&program), TransitionPhase::Confirming);
    advance_to(&mut program, EMBED_AT);
    assert_eq!(phase(&program), TransitionPhase::Embedded);
}

#[test]
fn each_transition_fires_once_in_order() {
    let mut program = program(1200);
    let mut seen = vec![phase(&program)];
    for _ in 0..400 {
        program.advance_time(ms(25));
        let current = phase(&program);
        if seen.last() != Some(&current) {
            seen.push(current);
        }
    }
    assert_eq!(
        seen,
        vec![
            TransitionPhase::Loading,
            TransitionPhase::Confirming,
            TransitionPhase::Embedded
        ]
    );
}

#[test]
fn seeded_run_keeps_settle_and_dwell_contracts() {
    for seed in [1, 7, 42, 1234, 0xDEAD_BEEF] {
        let mut program =
            landing_program(LandingConfig::default(), XorShiftRandom::new(seed), 1200)
                .expect("valid config");
        let loading = program
            .run_until(ms(60_000), |m| m.progress().is_complete())
            .expect("progress completes");
        assert_eq!(loading.as_millis() % 150, 0, "completion lands on a tick");

        let settle = program
            .run_until(ms(60_000), |m| m.phase() == TransitionPhase::Confirming)
            .expect("confirming begins");
        assert_eq!(settle, ms(500));

        let dwell = program
            .run_until(ms(60_000), |m| m.phase() == TransitionPhase::Embedded)
            .expect("embedded begins");
        assert_eq!(dwell, ms(3000));
    }
}

#[test]
fn progress_views_are_monotonic_and_pinned() {
    let mut program = landing_program(LandingConfig::default(), XorShiftRandom::new(9), 1200)
        .expect("valid config");
    let mut last = 0.0;
    while phase(&program) == TransitionPhase::Loading {
        if let Some(View::Loading(view)) = program.view() {
            assert!(view.percent >= last);
            assert!(view.percent <= 100.0);
            assert_eq!(view.caption, StatusCaption::for_progress(program.model().progress()));
            last = view.percent;
        }
        program.advance_time(ms(150));
    }
    assert_eq!(last, 100.0);
}

// ============================================================================
// Resource lifecycle
// ============================================================================

#[test]
fn subscriptions_follow_phase() {
    let mut program = program(1200);
    assert_eq!(program.running_subscriptions(), &[VIEWPORT_SUB, PROGRESS_SUB]);
    assert_eq!(program.pending_timers(), 1);

    advance_to(&mut program, COMPLETE_AT);
    assert_eq!(program.running_subscriptions(), &[VIEWPORT_SUB, SETTLE_SUB]);
    assert_eq!(program.next_deadline(), Some(ms(CONFIRM_AT)));

    advance_to(&mut program, CONFIRM_AT);
    assert_eq!(program.running_subscriptions(), &[VIEWPORT_SUB, CONFIRM_SUB]);
    assert_eq!(program.next_deadline(), Some(ms(EMBED_AT)));

    advance_to(&mut program, EMBED_AT);
    assert!(program.running_subscriptions().is_empty());
    assert_eq!(program.pending_timers(), 0);
    assert!(!program.has_resize_listener());
}

#[test]
fn embedded_is_terminal() {
    let mut program = program(400);
    advance_to(&mut program, EMBED_AT);
    let frames = program.frame_idx();

    let step = program.resize(1600);
    assert_eq!(step.messages_processed, 0);
    program.advance_time(ms(600_000));

    assert_eq!(phase(&program), TransitionPhase::Embedded);
    assert_eq!(program.model().viewport_class(), ViewportClass::Mobile);
    assert_eq!(embedded_url(&program).as_deref(), Some(DEFAULT_MOBILE_URL));
    assert_eq!(program.frame_idx(), frames);
}

#[test]
fn teardown_mid_loading_releases_everything() {
    let mut program = program(1200);
    advance_to(&mut program, 450);
    let progress = program.model().progress();
    let frames = program.frame_idx();
    assert!(progress.value() > 0.0);

    program.teardown();
    assert!(!program.is_running());
    assert_eq!(program.pending_timers(), 0);
    assert!(!program.has_resize_listener());

    let step = program.resize(400);
    assert_eq!(step.messages_processed, 0);
    let step = program.advance_time(ms(60_000));
    assert_eq!(step.messages_processed, 0);

    assert_eq!(program.model().progress(), progress);
    assert_eq!(program.model().viewport_class(), ViewportClass::Desktop);
    assert_eq!(phase(&program), TransitionPhase::Loading);
    assert_eq!(program.frame_idx(), frames);
}

#[test]
fn teardown_while_confirming_cancels_dwell() {
    let mut program = program(1200);
    advance_to(&mut program, CONFIRM_AT + 1000);
    program.teardown();
    program.advance_time(ms(10_000));
    assert_eq!(phase(&program), TransitionPhase::Confirming);
    assert!(program.model().destination().is_none());
}

#[test]
fn custom_timings_are_honored() {
    let config = LandingConfig {
        tick_interval_ms: 100,
        max_increment: 50.0,
        settle_delay_ms: 0,
        confirm_dwell_ms: 1000,
        ..LandingConfig::default()
    };
    // 0.5 * 50 = 25 per tick: complete on tick 4 (t = 400).
    let mut program =
        landing_program(config, ScriptedRandom::constant(0.5), 1200).expect("valid config");
    advance_to(&mut program, 400);
    assert_eq!(phase(&program), TransitionPhase::Confirming);
    advance_to(&mut program, 1399);
    assert_eq!(phase(&program), TransitionPhase::Confirming);
    advance_to(&mut program, 1400);
    assert_eq!(phase(&program), TransitionPhase::Embedded);
}
