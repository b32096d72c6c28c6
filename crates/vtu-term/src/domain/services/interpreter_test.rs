use vtu_core::{AuthSession, DataPlan, MeterType, Session, User, VtuError};

use super::Interpreter;
use crate::domain::models::{ApiCall, ApiOutcome, LineKind, Stage};

fn test_user() -> User {
    return User {
        id: "u1".to_string(),
        username: "operator".to_string(),
        email: "op@example.com".to_string(),
        wallet_balance: 2500.0,
    };
}

fn authed_session() -> Session {
    let mut session = Session::new();
    session.set_user(test_user());
    return session;
}

fn plan(id: &str, network: &str, size: &str) -> DataPlan {
    return DataPlan {
        id: id.to_string(),
        network: network.to_string(),
        size: size.to_string(),
        amount: 350.0,
        duration: "30 days".to_string(),
    };
}

fn has_error_line(out: &super::StepOutput) -> bool {
    return out.lines.iter().any(|line| line.kind == LineKind::Error);
}

#[test]
fn test_unknown_command_reports_error_without_transition() {
    let mut interpreter = Interpreter::new();
    let out = interpreter.handle_line("FORMAT_C", &Session::new());

    assert!(has_error_line(&out));
    assert!(out.call.is_none());
    assert_eq!(*interpreter.stage(), Stage::Idle);
}

#[test]
fn test_guarded_command_refused_without_session() {
    let mut interpreter = Interpreter::new();
    let out = interpreter.handle_line("DATA", &Session::new());

    assert!(out
        .lines
        .iter()
        .any(|line| line.text.contains("UNAUTHORIZED")));
    assert!(out.call.is_none());
    assert_eq!(*interpreter.stage(), Stage::Idle);
    // No prompt is emitted: just the echo and the refusal.
    assert_eq!(out.lines.len(), 2);
}

#[test]
fn test_abort_mid_flow_discards_parameters() {
    let session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("AIRTIME", &session);
    interpreter.handle_line("MTN", &session);
    assert!(matches!(interpreter.stage(), Stage::AirtimeAmount { .. }));

    let out = interpreter.handle_line("cancel", &session);

    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out.call.is_none());
    assert!(out
        .lines
        .iter()
        .any(|line| line.text.contains("RETURNING_TO_IDLE_STATE")));
}

#[test]
fn test_login_flow_issues_single_call_with_masked_secret() {
    let session = Session::new();
    let mut interpreter = Interpreter::new();

    let out = interpreter.handle_line("LOGIN", &session);
    assert!(out.call.is_none());

    interpreter.handle_line("neo@example.com", &session);
    let out = interpreter.handle_line("hunter2", &session);

    match out.call {
        Some(ApiCall::Login { email, password }) => {
            assert_eq!(email, "neo@example.com");
            assert_eq!(password, "hunter2");
        }
        other => panic!("expected login call, got {:?}", other),
    }
    assert_eq!(out.lines[0].text, "> ********");
    assert!(!out.lines.iter().any(|line| line.text.contains("hunter2")));
}

#[test]
fn test_login_success_installs_session_and_resets() {
    let mut session = Session::new();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("LOGIN", &session);
    interpreter.handle_line("op@example.com", &session);
    interpreter.handle_line("secret", &session);

    let out = interpreter.handle_outcome(
        ApiOutcome::Login(Ok(AuthSession {
            token: "tok_1".to_string(),
            user: test_user(),
        })),
        &mut session,
    );

    assert!(session.is_authenticated());
    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out
        .lines
        .iter()
        .any(|line| line.kind == LineKind::Success && line.text.contains("ACCESS_GRANTED")));
}

#[test]
fn test_signup_secret_never_reaches_transcript() {
    let session = Session::new();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("SIGNUP", &session);
    interpreter.handle_line("operator", &session);
    interpreter.handle_line("op@example.com", &session);
    let out = interpreter.handle_line("s3cr3t!", &session);

    assert_eq!(out.lines[0].text, "> ********");
    assert!(!out.lines.iter().any(|line| line.text.contains("s3cr3t!")));
    match out.call {
        Some(ApiCall::Signup { username, email, password }) => {
            assert_eq!(username, "operator");
            assert_eq!(email, "op@example.com");
            assert_eq!(password, "s3cr3t!");
        }
        other => panic!("expected signup call, got {:?}", other),
    }
}

#[test]
fn test_carrier_resolution_by_id_and_name_is_equivalent() {
    let session = authed_session();

    let mut by_id = Interpreter::new();
    by_id.handle_line("AIRTIME", &session);
    by_id.handle_line("1", &session);

    let mut by_name = Interpreter::new();
    by_name.handle_line("AIRTIME", &session);
    by_name.handle_line("mtn", &session);

    match (by_id.stage(), by_name.stage()) {
        (Stage::AirtimeAmount { carrier: a }, Stage::AirtimeAmount { carrier: b }) => {
            assert_eq!(a, b);
            assert_eq!(a.id, 1);
        }
        other => panic!("expected both interpreters mid-flow, got {:?}", other),
    }
}

#[test]
fn test_unknown_carrier_reprompts_in_place() {
    let session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("AIRTIME", &session);
    let out = interpreter.handle_line("VODAFONE", &session);

    assert!(has_error_line(&out));
    assert!(out.call.is_none());
    assert_eq!(*interpreter.stage(), Stage::AirtimeNetwork);
}

#[test]
fn test_full_data_chain_issues_one_purchase_call() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();

    interpreter.handle_line("DATA", &session);
    let out = interpreter.handle_line("1", &session);
    assert!(matches!(out.call, Some(ApiCall::FetchPlans)));
    assert!(matches!(interpreter.stage(), Stage::DataPlansLoading { .. }));

    let plans = vec![
        plan("p-100", "MTN", "1GB"),
        plan("p-200", "MTN", "2GB"),
        plan("p-900", "GLO", "1GB"),
    ];
    let out = interpreter.handle_outcome(ApiOutcome::Plans(Ok(plans)), &mut session);
    // Only the two MTN plans are listed.
    assert!(out.lines.iter().any(|line| line.text.contains("1 - 1GB")));
    assert!(out.lines.iter().any(|line| line.text.contains("2 - 2GB")));
    assert!(!out.lines.iter().any(|line| line.text.contains("3 -")));

    interpreter.handle_line("2", &session);
    let out = interpreter.handle_line("08010000000", &session);

    match out.call {
        Some(ApiCall::BuyData(request)) => {
            assert_eq!(request.network_id, "1");
            assert_eq!(request.plan_id, "p-200");
            assert_eq!(request.mobile_number, "08010000000");
            assert!(!request.ported_number);
        }
        other => panic!("expected data purchase, got {:?}", other),
    }

    let out = interpreter.handle_outcome(ApiOutcome::BuyData(Ok(())), &mut session);
    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out.lines.iter().any(|line| line.kind == LineKind::Success));
}

#[test]
fn test_invalid_plan_index_reprompts() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("DATA", &session);
    interpreter.handle_line("1", &session);
    interpreter.handle_outcome(
        ApiOutcome::Plans(Ok(vec![plan("p-100", "MTN", "1GB")])),
        &mut session,
    );

    let out = interpreter.handle_line("9", &session);

    assert!(has_error_line(&out));
    assert!(matches!(interpreter.stage(), Stage::DataPlanChoice { .. }));
}

#[test]
fn test_plan_fetch_failure_aborts_to_idle() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("DATA", &session);
    interpreter.handle_line("1", &session);

    let out = interpreter.handle_outcome(
        ApiOutcome::Plans(Err(VtuError::Api("UPSTREAM_DOWN".to_string()))),
        &mut session,
    );

    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out.lines.iter().any(|line| line.text.contains("UPSTREAM_DOWN")));
}

#[test]
fn test_empty_plan_list_aborts_to_idle() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("DATA", &session);
    interpreter.handle_line("4", &session);

    let out = interpreter.handle_outcome(
        ApiOutcome::Plans(Ok(vec![plan("p-100", "MTN", "1GB")])),
        &mut session,
    );

    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out
        .lines
        .iter()
        .any(|line| line.text.contains("NO_PACKETS_AVAILABLE_FOR_THIS_NODE")));
}

#[test]
fn test_airtime_request_carries_carrier_name_and_amount() {
    let session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("AIRTIME", &session);
    interpreter.handle_line("2", &session);

    let out = interpreter.handle_line("abc", &session);
    assert!(has_error_line(&out));
    let out = interpreter.handle_line("0", &session);
    assert!(has_error_line(&out));

    interpreter.handle_line("500", &session);
    let out = interpreter.handle_line("08011112222", &session);

    match out.call {
        Some(ApiCall::BuyAirtime(request)) => {
            assert_eq!(request.network_id, "GLO");
            assert_eq!(request.amount, 500);
            assert_eq!(request.phone, "08011112222");
        }
        other => panic!("expected airtime purchase, got {:?}", other),
    }
}

#[test]
fn test_meter_protocol_accepts_only_the_two_fixed_choices() {
    let session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("ELECT", &session);
    interpreter.handle_line("Eko Electric", &session);

    let out = interpreter.handle_line("5", &session);
    assert!(has_error_line(&out));
    assert!(matches!(interpreter.stage(), Stage::ElectricityMeterType { .. }));

    interpreter.handle_line("1", &session);
    match interpreter.stage() {
        Stage::ElectricityMeterNumber { meter_type, .. } => {
            assert_eq!(*meter_type, MeterType::Prepaid);
        }
        other => panic!("expected meter number stage, got {:?}", other),
    }
}

#[test]
fn test_full_electricity_chain_builds_request() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("ELECT", &session);
    interpreter.handle_line("1", &session);
    interpreter.handle_line("2", &session);
    interpreter.handle_line("45030112345", &session);
    interpreter.handle_line("5000", &session);
    let out = interpreter.handle_line("08011112222", &session);

    match out.call {
        Some(ApiCall::BuyElectricity(request)) => {
            assert_eq!(request.disco_name, "Ikeja Electric");
            assert_eq!(request.meter_type, MeterType::Postpaid);
            assert_eq!(request.meter_number, "45030112345");
            assert_eq!(request.amount, 5000);
            assert_eq!(request.mobile_number, "08011112222");
        }
        other => panic!("expected electricity purchase, got {:?}", other),
    }

    let out = interpreter.handle_outcome(
        ApiOutcome::BuyElectricity(Err(VtuError::Api("GRID_OFFLINE".to_string()))),
        &mut session,
    );
    assert_eq!(*interpreter.stage(), Stage::Idle);
    assert!(out.lines.iter().any(|line| line.text.contains("GRID_OFFLINE")));
}

#[test]
fn test_balance_reports_fresh_profile() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    let out = interpreter.handle_line("BALANCE", &session);
    assert!(matches!(out.call, Some(ApiCall::FetchBalance)));

    let mut refreshed = test_user();
    refreshed.wallet_balance = 9000.0;
    let out = interpreter.handle_outcome(ApiOutcome::Balance(Ok(refreshed)), &mut session);

    assert!(out.lines.iter().any(|line| line.text.contains("₦9000")));
    assert_eq!(session.user().unwrap().wallet_balance, 9000.0);
}

#[test]
fn test_logout_clears_session() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    let out = interpreter.handle_line("LOGOUT", &session);
    assert!(matches!(out.call, Some(ApiCall::Logout)));

    interpreter.handle_outcome(ApiOutcome::Logout, &mut session);
    assert!(!session.is_authenticated());
}

#[test]
fn test_change_secret_masks_both_values() {
    let session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("PASSWD", &session);
    let first = interpreter.handle_line("old-secret", &session);
    let second = interpreter.handle_line("new-secret", &session);

    assert_eq!(first.lines[0].text, "> ********");
    assert_eq!(second.lines[0].text, "> ********");
    match second.call {
        Some(ApiCall::ChangePassword(request)) => {
            assert_eq!(request.old_password, "old-secret");
            assert_eq!(request.new_password, "new-secret");
        }
        other => panic!("expected change password call, got {:?}", other),
    }
}

#[test]
fn test_update_account_refreshes_stored_user() {
    let mut session = authed_session();
    let mut interpreter = Interpreter::new();
    interpreter.handle_line("UPDATE", &session);
    interpreter.handle_line("renamed", &session);
    let out = interpreter.handle_line("renamed@example.com", &session);

    match out.call {
        Some(ApiCall::UpdateAccount(request)) => {
            assert_eq!(request.username, "renamed");
            assert_eq!(request.email, "renamed@example.com");
        }
        other => panic!("expected update call, got {:?}", other),
    }

    let mut updated = test_user();
    updated.username = "renamed".to_string();
    interpreter.handle_outcome(ApiOutcome::UpdateAccount(Ok(updated)), &mut session);
    assert_eq!(session.user().unwrap().username, "renamed");
    assert_eq!(*interpreter.stage(), Stage::Idle);
}

#[test]
fn test_clear_flag_leaves_stage_untouched() {
    let mut interpreter = Interpreter::new();
    let out = interpreter.handle_line("CLEAR", &Session::new());

    assert!(out.clear_transcript);
    assert!(out.call.is_none());
    assert_eq!(*interpreter.stage(), Stage::Idle);
}
