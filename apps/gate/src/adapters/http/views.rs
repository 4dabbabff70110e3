//! Server-rendered pages.
//!
//! Every interpolated value goes through [`escape_html`].

use axum::response::Html;
use mentorship_sdk::{LOGIN_PATH, Principal, Role, SIGNUP_PATH};

pub fn escape_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn layout(title: &str, principal: Option<&Principal>, head: &str, body: &str) -> Html<String> {
    let nav = match principal {
        Some(p) => format!(
            r#"<span class="who">Signed in as {name} ({role})</span>
<a href="{landing}">Dashboard</a>
<form method="post" action="/logout"><button type="submit">Log out</button></form>"#,
            name = escape_html(&p.name),
            role = p.role,
            landing = p.landing_path(),
        ),
        None => format!(r#"<a href="{LOGIN_PATH}">Log in</a> <a href="{SIGNUP_PATH}">Sign up</a>"#),
    };

    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Mentorship</title>
{head}
</head>
<body>
<header><a href="/">Mentorship</a> <nav>{nav}</nav></header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
    ))
}

pub fn home_page(principal: Option<&Principal>) -> Html<String> {
    let body = match principal {
        Some(p) => format!(
            r#"<h1>Welcome back, {name}</h1>
<p><a href="{landing}">Go to your dashboard</a></p>"#,
            name = escape_html(&p.name),
            landing = p.landing_path(),
        ),
        None => format!(
            r#"<h1>Mentorship</h1>
<p>Connect mentors and mentees, schedule meetings and track achievements.</p>
<p><a href="{LOGIN_PATH}">Log in</a> or <a href="{SIGNUP_PATH}">create an account</a>.</p>"#
        ),
    };
    layout("Home", principal, "", &body)
}

#[derive(Debug, Default)]
pub struct LoginView<'a> {
    pub error: Option<&'a str>,
    pub registered: bool,
    pub next: Option<&'a str>,
    pub email: &'a str,
}

pub fn login_page(view: &LoginView<'_>) -> Html<String> {
    let mut body = String::from("<h1>Log in</h1>\n");
    if view.registered {
        body.push_str(r#"<p class="notice">Account created. Please log in.</p>"#);
        body.push('\n');
    }
    if let Some(error) = view.error {
        body.push_str(&format!(
            r#"<p class="error" role="alert">{}</p>"#,
            escape_html(error)
        ));
        body.push('\n');
    }

    let next = view
        .next
        .map(|n| {
            format!(
                r#"<input type="hidden" name="next" value="{}">"#,
                escape_html(n)
            )
        })
        .unwrap_or_default();

    body.push_str(&format!(
        r#"<form method="post" action="{LOGIN_PATH}">
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Password <input type="password" name="password" required></label>
{next}
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="{SIGNUP_PATH}">Sign up</a></p>"#,
        email = escape_html(view.email),
    ));

    layout("Log in", None, "", &body)
}

#[derive(Debug, Default)]
pub struct SignupView<'a> {
    pub error: Option<&'a str>,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: Option<Role>,
}

pub fn signup_page(view: &SignupView<'_>) -> Html<String> {
    let error = view
        .error
        .map(|e| format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    let options: String = Role::ALL
        .into_iter()
        .filter(Role::is_self_registrable)
        .map(|r| {
            let selected = if view.role == Some(r) { " selected" } else { "" };
            format!(r#"<option value="{r}"{selected}>{r}</option>"#)
        })
        .collect();

    let body = format!(
        r#"<h1>Sign up</h1>
{error}
<form method="post" action="{SIGNUP_PATH}">
<label>First name <input name="first_name" value="{first}" required></label>
<label>Last name <input name="last_name" value="{last}" required></label>
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<label>I am a <select name="role">{options}</select></label>
<button type="submit">Create account</button>
</form>
<p>Already registered? <a href="{LOGIN_PATH}">Log in</a></p>"#,
        first = escape_html(view.first_name),
        last = escape_html(view.last_name),
        email = escape_html(view.email),
    );

    layout("Sign up", None, "", &body)
}

/// Signed-in visitors are sent back to their dashboard after a short pause.
pub fn unauthorized_page(principal: Option<&Principal>) -> Html<String> {
    let (head, hint) = match principal {
        Some(p) => (
            format!(
                r#"<meta http-equiv="refresh" content="3;url={}">"#,
                p.landing_path()
            ),
            format!(
                r#"<p>Redirecting you to <a href="{0}">your dashboard</a>...</p>"#,
                p.landing_path()
            ),
        ),
        None => (
            String::new(),
            format!(r#"<p><a href="{LOGIN_PATH}">Log in</a> with a different account.</p>"#),
        ),
    };

    let body = format!(
        r#"<h1>Unauthorized Access</h1>
<p>You don't have permission to access this page.</p>
{hint}"#
    );
    layout("Unauthorized", principal, &head, &body)
}

fn sections(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Admin => &[
            ("users", "Users"),
            ("meetings", "Meetings"),
            ("achievements", "Achievements"),
        ],
        Role::Mentor => &[
            ("mentees", "Mentees"),
            ("meetings", "Meetings"),
            ("messages", "Messages"),
            ("profile", "Profile"),
        ],
        Role::Mentee => &[
            ("meetings", "Meetings"),
            ("achievements", "Achievements"),
            ("messages", "Messages"),
            ("profile", "Profile"),
        ],
    }
}

/// Dashboard shell for `principal`'s role. `section` is the path below the landing path.
pub fn dashboard_page(principal: &Principal, section: &str) -> Html<String> {
    let landing = principal.landing_path();
    let current = section.split('/').find(|s| !s.is_empty());

    let links: String = sections(principal.role)
        .iter()
        .map(|(slug, label)| {
            let class = if current == Some(*slug) {
                r#" class="active""#
            } else {
                ""
            };
            format!(r#"<li><a href="{landing}/{slug}"{class}>{label}</a></li>"#)
        })
        .collect();

    let heading = current
        .and_then(|c| sections(principal.role).iter().find(|(slug, _)| *slug == c))
        .map(|(_, label)| *label)
        .unwrap_or("Overview");

    let body = format!(
        r#"<aside><ul><li><a href="{landing}">Dashboard</a></li>{links}</ul></aside>
<section>
<h1>{heading}</h1>
<p>Welcome, {name}.</p>
</section>"#,
        name = escape_html(&principal.name),
    );

    layout(heading, Some(principal), "", &body)
}

/// Shown while the session is still being resolved.
pub fn waiting_page() -> Html<String> {
    layout(
        "Checking session",
        None,
        r#"<meta http-equiv="refresh" content="1">"#,
        "<p>Checking your session...</p>",
    )
}
