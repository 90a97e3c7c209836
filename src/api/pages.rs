//! In-crate HTML pages.
//!
//! Two pages only, so they are rendered as strings rather than through a
//! template engine. Everything interpolated goes through [`escape_html`].

/// Renders the login form, with an optional notice line above it.
pub fn login_page(script_name: &str, notice: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Log in</title>
</head>
<body>
<h1>Log in</h1>
{notice}<form method="post" action="{action}">
<label>Username <input type="text" name="username" autofocus></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log in</button>
</form>
</body>
</html>
"#,
        notice = notice_block(notice),
        action = format!("{}/login", escape_html(script_name)),
    )
}

/// Renders the protected page for a logged-in user.
pub fn index_page(script_name: &str, username: &str, notice: Option<&str>) -> String {
    let prefix = escape_html(script_name);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Home</title>
</head>
<body>
<h1>Welcome, {username}</h1>
{notice}<ul>
<li><a href="{prefix}/delete">Delete data</a></li>
<li><a href="{prefix}/logout">Log out</a></li>
</ul>
</body>
</html>
"#,
        username = escape_html(username),
        notice = notice_block(notice),
    )
}

fn notice_block(notice: Option<&str>) -> String {
    match notice {
        Some(message) => format!("<p class=\"notice\">{}</p>\n", escape_html(message)),
        None => String::new(),
    }
}

/// Minimal HTML escaping for interpolated values.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
