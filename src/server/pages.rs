//! Minimal page shells; the browser UI itself lives elsewhere.

use axum::{
    http::StatusCode,
    response::{Html, Redirect},
};

use crate::auth::DASHBOARD_PATH;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} · Distill</title></head>\n<body>\n{}\n</body>\n</html>\n",
        title, body
    ))
}

pub async fn home() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

pub async fn login() -> Html<String> {
    page(
        "Sign in",
        "<h1>Welcome back</h1>\n<form data-endpoint=\"/api/auth/login\"><input type=\"email\" name=\"email\"><input type=\"password\" name=\"password\"><button>Sign in</button></form>",
    )
}

pub async fn signup() -> Html<String> {
    page(
        "Create account",
        "<h1>Create an account</h1>\n<form data-endpoint=\"/api/auth/signup\"><input type=\"email\" name=\"email\"><input type=\"password\" name=\"password\"><button>Sign up</button></form>",
    )
}

pub async fn verify_email() -> Html<String> {
    page(
        "Check your email",
        "<h1>Check your email</h1>\n<p>We've sent you a verification link to complete your registration.</p>",
    )
}

pub async fn dashboard() -> Html<String> {
    page(
        "Dashboard",
        "<h1>Distill</h1>\n<form data-endpoint=\"/api/summarize\"><textarea name=\"content\"></textarea><button>Distill</button></form>",
    )
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        page("Not found", "<h1>Page not found</h1>"),
    )
}
