//! The render collaborator: handlers pass typed payloads, these functions
//! produce complete HTML pages. All user-supplied text is escaped.

use axum::response::Html;

use crate::db::models::Post;

/// Feed entries show at most this many characters of content.
const FEED_PREVIEW_CHARS: usize = 100;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let cut: String = chars.by_ref().take(FEED_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{} ...", cut)
    } else {
        cut
    }
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    ))
}

pub fn home_page(username: &str, posts: &[Post]) -> Html<String> {
    let mut body = format!(
        "<h1>Home</h1>\n<p>Welcome back, {}.</p>\n<p><a href=\"/compose\">Compose</a> | <a href=\"/logout\">Log out</a></p>\n",
        escape(username)
    );
    for post in posts {
        body.push_str(&format!(
            "<article>\n<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/posts/{}\">Read more</a></p>\n</article>\n",
            escape(&post.title),
            escape(&preview(&post.content)),
            post.id
        ));
    }
    layout("Home", &body)
}

pub fn signup_page() -> Html<String> {
    layout(
        "Sign Up",
        "<h1>Sign Up</h1>\n\
         <form action=\"/signup\" method=\"post\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Sign Up</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
    )
}

pub fn login_page() -> Html<String> {
    layout(
        "Log In",
        "<h1>Log In</h1>\n\
         <form action=\"/login\" method=\"post\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log In</button>\n\
         </form>\n\
         <p>New here? <a href=\"/signup\">Sign up</a></p>",
    )
}

pub fn compose_page() -> Html<String> {
    layout(
        "Compose",
        "<h1>Compose</h1>\n\
         <form action=\"/compose\" method=\"post\">\n\
         <label>Title <input type=\"text\" name=\"title\"></label>\n\
         <label>Content <textarea name=\"content\"></textarea></label>\n\
         <button type=\"submit\">Publish</button>\n\
         </form>",
    )
}

pub fn post_page(post: &Post) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Home</a></p>",
        escape(&post.title),
        escape(&post.content)
    );
    layout(&post.title, &body)
}

pub fn not_found_page() -> Html<String> {
    layout(
        "Not Found",
        "<h1>Not Found</h1>\n<p>That page does not exist.</p>\n<p><a href=\"/\">Home</a></p>",
    )
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!("<h1>Error</h1>\n<p>{}</p>", escape(message));
    layout("Error", &body)
}
