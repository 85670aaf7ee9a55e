use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use serde_json::{json, Value};
use tempfile::tempdir;

fn run(args: &[&str], missing_team: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kanban-authz"));
    cmd.args(args).env("RUST_LOG", "off");
    match missing_team {
        Some(value) => cmd.env("ASSIGNMENT_MISSING_TEAM", value),
        None => cmd.env_remove("ASSIGNMENT_MISSING_TEAM"),
    };
    cmd.output().expect("run kanban-authz")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

fn write_json(dir: &Path, name: &str, value: &Value) -> Result<String> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(value)?)?;
    Ok(path.display().to_string())
}

#[test]
fn check_reports_reason_for_member() {
    let args = ["check", "--role", "member", "--actor", "u1", "--target", "u2"];
    let out = stdout_json(&run(&args, None));

    assert_eq!(
        out,
        json!({"allowed": false, "reason": "Members can only assign tasks to themselves"})
    );
}

#[test]
fn check_admin_against_team_file() -> Result<()> {
    let dir = tempdir()?;
    let ctx = write_json(
        dir.path(),
        "ctx.json",
        &json!({"projectId": "p1", "projectTeam": [{"id": "u3"}]}),
    )?;

    let ctx = ctx.as_str();

    let off_team = [
        "check", "--role", "admin", "--actor", "u1", "--target", "u2", "--context", ctx,
    ];
    let out = stdout_json(&run(&off_team, None));
    assert_eq!(out["allowed"], json!(false));
    assert_eq!(
        out["reason"],
        json!("Selected user is not a member of this project team")
    );

    let on_team = [
        "check", "--role", "admin", "--actor", "u1", "--target", "u3", "--context", ctx,
    ];
    let out = stdout_json(&run(&on_team, None));
    assert_eq!(out, json!({"allowed": true, "reason": null}));
    Ok(())
}

#[test]
fn missing_team_policy_comes_from_env() {
    let args = ["check", "--role", "admin", "--actor", "u1", "--target", "u2"];

    assert_eq!(stdout_json(&run(&args, None))["allowed"], json!(true));
    assert_eq!(stdout_json(&run(&args, Some("deny")))["allowed"], json!(false));

    let bad = run(&args, Some("sometimes"));
    assert!(!bad.status.success());
    let err: Value = serde_json::from_slice(&bad.stderr).expect("stderr is json");
    assert_eq!(err["error"], json!("configuration"));
}

#[test]
fn members_filters_by_role_and_team() -> Result<()> {
    let dir = tempdir()?;
    let members = write_json(
        dir.path(),
        "members.json",
        &json!([
            {"id": "u1", "name": "Ada", "email": "ada@example.com", "role": "admin"},
            {"id": "u2", "name": "Brian", "email": "brian@example.com", "role": "member"},
            {"id": "u3", "name": "Chen", "email": "chen@example.com", "role": "viewer"}
        ]),
    )?;
    let ctx = write_json(
        dir.path(),
        "ctx.json",
        &json!({"projectTeam": [{"id": "u1"}, {"id": "u2"}]}),
    )?;

    let (members, ctx) = (members.as_str(), ctx.as_str());

    let admin = [
        "members", "--role", "admin", "--actor", "u1", "--members", members, "--context", ctx,
    ];
    let out = stdout_json(&run(&admin, None));
    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["u1", "u2"]);

    let owner = [
        "members", "--role", "owner", "--actor", "u1", "--members", members, "--context", ctx,
    ];
    let out = stdout_json(&run(&owner, None));
    assert_eq!(out.as_array().unwrap().len(), 3);
    Ok(())
}

#[test]
fn members_tolerates_non_string_roles() -> Result<()> {
    let dir = tempdir()?;
    let members = write_json(
        dir.path(),
        "members.json",
        &json!([
            {"id": "u1", "name": "Ada", "role": 3},
            {"id": "u2", "name": "Brian", "role": {"level": "owner"}}
        ]),
    )?;

    let args = ["members", "--role", "owner", "--actor", "u1", "--members", members.as_str()];
    let out = stdout_json(&run(&args, None));
    let roles: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, ["member", "member"]);
    Ok(())
}

#[test]
fn members_rejects_malformed_file() -> Result<()> {
    let dir = tempdir()?;
    let members = write_json(dir.path(), "members.json", &json!([{"id": "u1"}, {"id": 42}]))?;

    let args = ["members", "--role", "owner", "--actor", "u1", "--members", members.as_str()];
    let out = run(&args, None);
    assert!(!out.status.success());
    let err: Value = serde_json::from_slice(&out.stderr)?;
    assert_eq!(err["error"], json!("bad_request"));
    assert!(err["message"].as_str().unwrap().contains("[1].id"));
    Ok(())
}

#[test]
fn validate_batch_output_uses_camel_case() {
    let args = ["validate", "--role", "superuser", "--actor", "u1", "u1", "u2"];
    let out = stdout_json(&run(&args, None));

    assert_eq!(
        out,
        json!({
            "valid": false,
            "invalidTargets": ["u2"],
            "firstErrorMessage": "Members can only assign tasks to themselves"
        })
    );
}

#[test]
fn message_and_capabilities() {
    let out = stdout_json(&run(&["message", "--role", "Owner"], None));
    assert_eq!(out["scope"], json!("organization"));
    assert_eq!(
        out["message"],
        json!("Owners can assign tasks to any organization member")
    );

    let table = stdout_json(&run(&["capabilities"], None));
    let table = table.as_array().unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(
        table[2],
        json!({
            "role": "admin",
            "canAssignToSelf": true,
            "canAssignToOthers": true,
            "assignmentScope": "project"
        })
    );
}
