//! Server-rendered pages
//!
//! Plain HTML with a shared layout. Forms post urlencoded bodies back to the
//! same path, which the credential extractor accepts alongside JSON.

use axum::response::Html;

const STYLE: &str = "body{font-family:sans-serif;max-width:28rem;margin:4rem auto;padding:0 1rem}\
form{display:flex;flex-direction:column;gap:.75rem}\
input{padding:.5rem;font-size:1rem}\
button{padding:.6rem;font-size:1rem;cursor:pointer}\
nav a{margin-right:1rem}";

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    ))
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <input type=\"email\" name=\"email\" placeholder=\"Email\" autocomplete=\"email\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\n\
         <button type=\"submit\">{submit}</button>\n</form>"
    )
}

/// Escape text for inclusion in HTML content
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn home() -> Html<String> {
    layout(
        "Home",
        "<h1>Welcome</h1>\n<nav><a href=\"/signup\">Sign up</a><a href=\"/login\">Log in</a>\
         <a href=\"/secret\">Secret</a></nav>",
    )
}

pub fn signup() -> Html<String> {
    layout(
        "Sign up",
        &format!(
            "<h1>Sign up</h1>\n{}\n<p>Already registered? <a href=\"/login\">Log in</a></p>",
            credentials_form("/signup", "Sign up")
        ),
    )
}

pub fn login() -> Html<String> {
    layout(
        "Log in",
        &format!(
            "<h1>Log in</h1>\n{}\n<p>No account yet? <a href=\"/signup\">Sign up</a></p>",
            credentials_form("/login", "Log in")
        ),
    )
}

pub fn secret(email: &str) -> Html<String> {
    layout(
        "Secret",
        &format!(
            "<h1>Secret page</h1>\n<p>Signed in as <strong>{}</strong>.</p>\n\
             <nav><a href=\"/\">Home</a><a href=\"/logout\">Log out</a></nav>",
            escape_html(email)
        ),
    )
}
