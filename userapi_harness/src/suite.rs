use crate::{
    assertions::TestContext,
    contract::{CheckKind, Expectations},
    error::Result,
};
use serde_json::{json, Value};
use tracing::info;
use userapi_core::REQUIRED_FIELDS_MESSAGE;

pub const TEST_USER_NAME: &str = "Test User";
pub const TEST_USER_EMAIL: &str = "test@example.com";
pub const SCRIPT_PAYLOAD: &str = "<script>alert('xss')</script>";
pub const NOT_FOUND_PATH: &str = "/nonexistent";

pub async fn run_check(
    check: CheckKind,
    ctx: &mut TestContext,
    expectations: &Expectations,
) -> Result<()> {
    info!("Running check '{}': {}", check, check.description());

    match check {
        CheckKind::Root => check_root(ctx, expectations).await,
        CheckKind::Health => check_health(ctx, expectations).await,
        CheckKind::ListUsers => check_list_users(ctx, expectations).await,
        CheckKind::CreateUser => check_create_user(ctx, expectations).await,
        CheckKind::NotFound => check_not_found(ctx, expectations).await,
        CheckKind::InvalidCreate => check_invalid_create(ctx, expectations).await,
        CheckKind::SanitizedCreate => check_sanitized_create(ctx, expectations).await,
    }
}

async fn check_root(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let response = ctx.probe().get("/").await?;

    ctx.assert(
        response.status == exp.root_status,
        format!("GET / returns {} (got {})", exp.root_status, response.status),
    )?;
    ctx.assert(
        response.str_field("message").is_some_and(|m| !m.is_empty()),
        "GET / has a non-empty message",
    )?;
    let version = response.str_field("version").unwrap_or_default();
    ctx.assert(
        version == exp.version,
        format!("GET / reports version {} (got '{}')", exp.version, version),
    )
}

async fn check_health(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let response = ctx.probe().get("/health").await?;

    ctx.assert(
        response.status == exp.health_status,
        format!("GET /health returns {} (got {})", exp.health_status, response.status),
    )?;
    ctx.assert(
        response.str_field("status") == Some("healthy"),
        "GET /health status is healthy",
    )?;
    ctx.assert(
        response
            .field("uptime")
            .and_then(Value::as_f64)
            .is_some_and(|uptime| uptime >= 0.0),
        "GET /health uptime is a non-negative number",
    )
}

async fn check_list_users(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let response = ctx.probe().get("/api/users").await?;

    ctx.assert(
        response.status == exp.list_status,
        format!("GET /api/users returns {} (got {})", exp.list_status, response.status),
    )?;
    ctx.assert(
        response.field("success") == Some(&Value::Bool(true)),
        "GET /api/users succeeds",
    )?;

    let users = response.field("data").and_then(Value::as_array);
    ctx.assert(users.is_some(), "GET /api/users data is an array")?;

    let len = users.map(Vec::len).unwrap_or_default();
    ctx.assert(
        len == exp.seeded_users,
        format!("GET /api/users lists {} users (got {})", exp.seeded_users, len),
    )
}

async fn check_create_user(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let body = json!({ "name": TEST_USER_NAME, "email": TEST_USER_EMAIL });
    let response = ctx.probe().post("/api/users", &body).await?;

    ctx.assert(
        response.status == exp.create_status,
        format!("POST /api/users returns {} (got {})", exp.create_status, response.status),
    )?;
    ctx.assert(
        response.field("success") == Some(&Value::Bool(true)),
        "POST /api/users succeeds",
    )?;

    let data = response.field("data");
    let field = |key: &str| data.and_then(|d| d.get(key)).and_then(Value::as_str);
    ctx.assert(
        field("name") == Some(TEST_USER_NAME),
        "POST /api/users echoes the name",
    )?;
    ctx.assert(
        field("email") == Some(TEST_USER_EMAIL),
        "POST /api/users echoes the email",
    )
}

async fn check_not_found(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let response = ctx.probe().get(NOT_FOUND_PATH).await?;

    ctx.assert(
        response.status == exp.not_found_status,
        format!(
            "GET {} returns {} (got {})",
            NOT_FOUND_PATH, exp.not_found_status, response.status
        ),
    )?;
    ctx.assert(
        response.str_field("error") == Some("Route not found"),
        format!("GET {} reports 'Route not found'", NOT_FOUND_PATH),
    )
}

async fn check_invalid_create(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let body = json!({ "name": TEST_USER_NAME });
    let response = ctx.probe().post("/api/users", &body).await?;

    ctx.assert(
        response.status == exp.invalid_create_status,
        format!(
            "POST /api/users without email returns {} (got {})",
            exp.invalid_create_status, response.status
        ),
    )?;
    ctx.assert(
        response.str_field("error") == Some(REQUIRED_FIELDS_MESSAGE),
        format!("POST /api/users without email reports '{}'", REQUIRED_FIELDS_MESSAGE),
    )
}

/// The service stores input verbatim, so this only passes when
/// `sanitized_input` is false.
async fn check_sanitized_create(ctx: &mut TestContext, exp: &Expectations) -> Result<()> {
    let body = json!({ "name": SCRIPT_PAYLOAD, "email": "xss@example.com" });
    let response = ctx.probe().post("/api/users", &body).await?;

    ctx.assert(
        response.status == exp.create_status,
        format!("POST /api/users returns {} (got {})", exp.create_status, response.status),
    )?;

    let name = response
        .field("data")
        .and_then(|d| d.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let sanitized = !name.contains("<script>");
    ctx.assert(
        sanitized == exp.sanitized_input,
        if exp.sanitized_input {
            format!("POST /api/users strips script tags (got '{}')", name)
        } else {
            "POST /api/users stores the name verbatim".to_string()
        },
    )
}
