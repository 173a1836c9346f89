//! Server-rendered HTML pages.
//!
//! `render` takes a view and a JSON object of variables. Missing variables
//! render as empty strings, and every interpolated value is HTML-escaped.

use axum::response::Html;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AllMaps,
    InitMap,
    CreateMap,
    ViewMap,
    EditMap,
    Profile,
    UserError,
    Error,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::AllMaps => "all_maps",
            View::InitMap => "init_map",
            View::CreateMap => "create_map",
            View::ViewMap => "view_map",
            View::EditMap => "edit_map",
            View::Profile => "profile",
            View::UserError => "user_error",
            View::Error => "error",
        }
    }
}

pub fn render(view: View, vars: &Value) -> Html<String> {
    let body = match view {
        View::AllMaps => all_maps(vars),
        View::InitMap => init_map(vars),
        View::CreateMap => format!(
            "<h1>Map created</h1>\n<p><a href=\"/maps/{id}\">{title}</a></p>",
            id = text(vars, "map_id"),
            title = text(vars, "title"),
        ),
        View::ViewMap => view_map(vars),
        View::EditMap => edit_map(vars),
        View::Profile => format!(
            "<h1>{username}</h1>\n<dl>\n<dt>Name</dt><dd>{first} {last}</dd>\n<dt>Email</dt><dd>{email}</dd>\n</dl>\n<img src=\"{picture}\" alt=\"profile picture\">",
            username = text(vars, "username"),
            first = text(vars, "first_name"),
            last = text(vars, "last_name"),
            email = text(vars, "email"),
            picture = text(vars, "picture"),
        ),
        View::UserError => format!(
            "<h1>Please log in</h1>\n<p>{}</p>",
            text(vars, "message")
        ),
        View::Error => format!(
            "<h1>{}</h1>\n<p>{}</p>",
            text(vars, "status"),
            text(vars, "message")
        ),
    };

    Html(layout(view, vars, &body))
}

fn layout(view: View, vars: &Value, body: &str) -> String {
    let nav = match vars.get("user_id").and_then(Value::as_str) {
        Some(user_id) => format!(
            "<a href=\"/users/{id}\">{id}</a> <form method=\"post\" action=\"/logout\"><button>Log out</button></form>",
            id = escape(user_id)
        ),
        None => "<span>Not logged in</span>".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Wikimaps</title></head>\n<body data-view=\"{}\">\n<nav><a href=\"/\">Maps</a> {}</nav>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        view.name(),
        nav,
        body
    )
}

fn all_maps(vars: &Value) -> String {
    let items: Vec<String> = vars
        .get("maps")
        .and_then(Value::as_array)
        .map(|maps| {
            maps.iter()
                .map(|map| {
                    format!(
                        "<li><a href=\"/maps/{}\">{}</a> {}</li>",
                        text(map, "id"),
                        text(map, "title"),
                        text(map, "description")
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    if items.is_empty() {
        "<h1>Maps</h1>\n<p>No maps yet.</p>\n<a href=\"/maps/new\">New map</a>".to_string()
    } else {
        format!(
            "<h1>Maps</h1>\n<ul>\n{}\n</ul>\n<a href=\"/maps/new\">New map</a>",
            items.join("\n")
        )
    }
}

fn init_map(_vars: &Value) -> String {
    "<h1>New map</h1>\n<form method=\"post\" action=\"/maps/new\">\n<input name=\"title\" placeholder=\"Title\">\n<textarea name=\"description\"></textarea>\n<button>Create</button>\n</form>".to_string()
}

fn view_map(vars: &Value) -> String {
    let map = vars.get("map").unwrap_or(&Value::Null);
    format!(
        "<h1>{title}</h1>\n<p>{description}</p>\n<div id=\"map\" data-points=\"/maps/{id}/json\"></div>",
        title = text(map, "title"),
        description = text(map, "description"),
        id = text(map, "id"),
    )
}

fn edit_map(vars: &Value) -> String {
    let map = vars.get("map").unwrap_or(&Value::Null);
    format!(
        "<h1>Edit {title}</h1>\n<form method=\"post\" action=\"/maps/{id}/points\">\n<input type=\"hidden\" name=\"map_id\" value=\"{id}\">\n<input name=\"title\" placeholder=\"Title\">\n<textarea name=\"description\"></textarea>\n<input name=\"img\" placeholder=\"Image URL\">\n<input name=\"lat\"> <input name=\"long\">\n<button>Add point</button>\n</form>\n<form method=\"post\" action=\"/maps/{id}/delete\"><button>Delete map</button></form>",
        title = text(map, "title"),
        id = text(map, "id"),
    )
}

/// Escaped string form of `vars[key]`
fn text(vars: &Value, key: &str) -> String {
    match vars.get(key) {
        Some(Value::String(s)) => escape(s),
        Some(Value::Null) | None => String::new(),
        Some(other) => escape(&other.to_string()),
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
