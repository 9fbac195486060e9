//! ANSI escape codes for `%{Color ...}`.
//!
//! The argument is `fg[+attrs][:bg[+h]]`, where a color is one of the eight basic names
//! or a 256-color index, and attrs are any of `b` bold, `B` blink, `u` underline,
//! `i` inverse, `h` high intensity. `reset` clears everything.
//!
//! ``` text
//! red          -> \x1b[0;31m
//! red+b        -> \x1b[0;1;31m
//! white:blue+h -> \x1b[0;37;104m
//! 208          -> \x1b[0;38;5;208m
//! ```

pub const RESET: &str = "\x1b[0m";

const COLOR_NAMES: [&str; 8] = ["black", "red", "green", "yellow", "blue", "magenta", "cyan", "white"];

enum Color {
    Basic(u8),
    Indexed(u8),
}

fn parse_color(name: &str) -> Option<Color> {
    if let Some(i) = COLOR_NAMES.iter().position(|n| *n == name) {
        return Some(Color::Basic(i as u8));
    }
    name.parse::<u8>().ok().map(Color::Indexed)
}

/// Turn a color argument into its escape sequence. Unknown colors give an empty string.
pub fn color_code(arg: &str) -> String {
    let arg = arg.trim().trim_matches(|c| c == '`' || c == '"' || c == '\'');
    if arg == "reset" {
        return RESET.to_string();
    }
    let (fg_part, bg_part) = match arg.split_once(':') {
        Some((fg, bg)) => (fg, bg),
        None => (arg, ""),
    };
    let (fg_name, fg_attrs) = fg_part.split_once('+').unwrap_or((fg_part, ""));
    let (bg_name, bg_attrs) = bg_part.split_once('+').unwrap_or((bg_part, ""));

    let mut codes: Vec<String> = Vec::new();
    for attr in fg_attrs.chars() {
        match attr {
            'b' => codes.push("1".to_string()),
            'B' => codes.push("5".to_string()),
            'u' => codes.push("4".to_string()),
            'i' => codes.push("7".to_string()),
            _ => {}
        }
    }
    if let Some(c) = parse_color(fg_name) {
        match c {
            Color::Basic(i) => {
                let base = if fg_attrs.contains('h') { 90 } else { 30 };
                codes.push((base + i as u32).to_string());
            }
            Color::Indexed(i) => codes.push(format!("38;5;{}", i)),
        }
    }
    if let Some(c) = parse_color(bg_name) {
        match c {
            Color::Basic(i) => {
                let base = if bg_attrs.contains('h') { 100 } else { 40 };
                codes.push((base + i as u32).to_string());
            }
            Color::Indexed(i) => codes.push(format!("48;5;{}", i)),
        }
    }
    if codes.is_empty() {
        return String::new();
    }
    format!("\x1b[0;{}m", codes.join(";"))
}
