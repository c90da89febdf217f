//! HTML pages served to the user agent.

fn escape_html(unsafe_str: &str) -> String {
    unsafe_str
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .error {{ color: red; }}
        .button {{ background: #4285f4; color: white; padding: 10px 20px; text-decoration: none; border-radius: 4px; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Landing page with the link that starts the Authorization Code flow.
pub fn login_page(authorization_url: &str) -> String {
    page(
        "OIDC Login",
        &format!(
            r#"    <h1>OIDC Authorization Code Demo</h1>
    <p>Sign in with your identity provider to receive an access token and an ID token.</p>
    <a href="{}" class="button">Login</a>"#,
            escape_html(authorization_url)
        ),
    )
}

pub fn missing_code_page() -> String {
    page(
        "OIDC Error",
        r#"    <h1 class="error">Missing authorization code</h1>
    <p>The callback was reached without an authorization code.</p>
    <a href="/" class="button">Start over</a>"#,
    )
}

pub fn authorization_denied_page(error: &str, description: Option<&str>) -> String {
    let description = description
        .map(|d| format!("\n    <p>{}</p>", escape_html(d)))
        .unwrap_or_default();
    page(
        "OIDC Error",
        &format!(
            r#"    <h1 class="error">Authorization failed: {}</h1>{}
    <a href="/" class="button">Start over</a>"#,
            escape_html(error),
            description
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_escapes_query_separators() {
        let html = login_page("https://auth.example.com/as/authorize?a=1&b=2");
        assert!(html.contains(r#"href="https://auth.example.com/as/authorize?a=1&amp;b=2""#));
    }

    #[test]
    fn test_recovery_links() {
        assert!(missing_code_page().contains(r#"href="/""#));
        assert!(authorization_denied_page("access_denied", None).contains(r#"href="/""#));
    }

    #[test]
    fn test_denied_page_escapes_provider_text() {
        let html = authorization_denied_page("access_denied", Some("<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
