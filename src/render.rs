// src/render.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local};

use crate::models::status::ServerStatus;

pub const IMAGE_WIDTH: u32 = 360;
pub const IMAGE_HEIGHT: u32 = 200;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn name_text(status: &ServerStatus) -> String {
    match &status.name {
        Some(name) => name.clone(),
        None => "Unknown SS14 server".to_string(),
    }
}

pub fn map_text(status: &ServerStatus) -> String {
    match &status.map {
        Some(map) => map.clone(),
        None => "Unknown map".to_string(),
    }
}

pub fn players_text(status: &ServerStatus) -> String {
    match (status.players, status.soft_max_players) {
        (Some(players), Some(max)) => format!("{} / {} players", players, max),
        (Some(players), None) => format!("{} players", players),
        (None, Some(max)) => format!("? / {} players", max),
        (None, None) => "Player count unavailable".to_string(),
    }
}

pub fn run_level_text(status: &ServerStatus) -> String {
    match status.run_level {
        Some(0) => "Initializing".to_string(),
        Some(1) => "Lobby".to_string(),
        Some(2) => "Pre-round".to_string(),
        Some(3) => "In round".to_string(),
        Some(level) => format!("Run level {}", level),
        None => "Run level unknown".to_string(),
    }
}

pub fn panic_bunker_text(status: &ServerStatus) -> String {
    match status.panic_bunker {
        Some(true) => "Panic bunker enabled".to_string(),
        Some(false) => "Panic bunker disabled".to_string(),
        None => "Panic bunker status unknown".to_string(),
    }
}

pub fn round_id_text(status: &ServerStatus) -> String {
    match status.round_id {
        Some(id) => id.to_string(),
        None => "?".to_string(),
    }
}

/// Round start in viewer-local time, or "Unavailable" when the server did not
/// report one.
pub fn round_start_text(status: &ServerStatus) -> String {
    match status.round_start_time {
        Some(start) => start.with_timezone(&Local).format(TIME_FORMAT).to_string(),
        None => "Unavailable".to_string(),
    }
}

pub fn retrieved_at_text(retrieved_at: DateTime<Local>) -> String {
    retrieved_at.format(TIME_FORMAT).to_string()
}

/// One-line status message shown after a successful fetch.
pub fn status_message(status: &ServerStatus) -> String {
    match &status.name {
        Some(name) => format!("Connected to {}.", name),
        None => "Received server status.".to_string(),
    }
}

/// HTML-entity escaping for text interpolated into the SVG. The values come
/// from an untrusted remote server and must never reach the markup raw.
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

/// Builds the status card as an SVG document. Pure function of its inputs:
/// identical (status, retrieved_at) pairs produce identical markup.
pub fn build_svg(status: &ServerStatus, retrieved_at: DateTime<Local>) -> String {
    let mut svg = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        ),
        w = IMAGE_WIDTH,
        h = IMAGE_HEIGHT,
    );
    svg.push_str("<rect width=\"100%\" height=\"100%\" rx=\"8\" fill=\"#1b1b2f\"/>");

    text_line(&mut svg, 32, 16, true, &name_text(status));
    text_line(&mut svg, 56, 12, false, &map_text(status));
    text_line(&mut svg, 80, 12, false, &players_text(status));
    text_line(&mut svg, 104, 12, false, &run_level_text(status));
    text_line(&mut svg, 128, 12, false, &panic_bunker_text(status));
    text_line(&mut svg, 152, 12, false, &format!("Round {}", round_id_text(status)));
    text_line(&mut svg, 172, 10, false, &format!("Round start: {}", round_start_text(status)));
    text_line(&mut svg, 188, 10, false, &format!("Retrieved: {}", retrieved_at_text(retrieved_at)));

    svg.push_str("</svg>");
    svg
}

/// Renders the status card and wraps it in a `data:image/svg+xml;base64,` URI
/// so the page needs no separate image fetch.
pub fn svg_data_uri(status: &ServerStatus, retrieved_at: DateTime<Local>) -> String {
    let svg = build_svg(status, retrieved_at);
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

fn text_line(svg: &mut String, y: u32, size: u32, bold: bool, text: &str) {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    svg.push_str(&format!(
        concat!(
            "<text x=\"16\" y=\"{y}\" font-family=\"sans-serif\" ",
            "font-size=\"{size}\" fill=\"#e6e6e6\"{weight}>{text}</text>"
        ),
        y = y,
        size = size,
        weight = weight,
        text = escape_markup(text),
    ));
}
