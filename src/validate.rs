// Field validators.
//
// Each field has a pure `parse_*` function that either yields a typed
// value or a `FieldError`, and a `prompt_*` routine that keeps asking
// until the parser accepts. There is no retry limit: the user is asked
// until the answer is usable.

use std::io;

use crate::error::FieldError;
use crate::ui::{Console, Tone};

pub const MIN_YEAR: u16 = 1900;
pub const MAX_YEAR: u16 = 2000;

/// Menu entries, keyed by the digit the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    Add,
    Delete,
    Update,
}

/// Empty input means "no id" (the store assigns one); otherwise digits only.
pub fn parse_id(raw: &str) -> Result<Option<String>, FieldError> {
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.chars().all(|c| c.is_ascii_digit()) {
        Ok(Some(raw.to_string()))
    } else {
        Err(FieldError::Id)
    }
}

/// Brand and model: non-empty, letters, digits and spaces only.
pub fn parse_name(raw: &str, what: &'static str) -> Result<String, FieldError> {
    if !raw.is_empty() && raw.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        Ok(raw.to_string())
    } else {
        Err(FieldError::Name(what))
    }
}

pub fn parse_year(raw: &str) -> Result<u16, FieldError> {
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::Year);
    }
    let year: u16 = raw.parse().map_err(|_| FieldError::Year)?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(FieldError::Year)
    }
}

/// Tri-state answer: empty is unset, `y`/`n` in either case are true/false.
pub fn parse_convertible(raw: &str) -> Result<Option<bool>, FieldError> {
    match raw {
        "" => Ok(None),
        "y" | "Y" => Ok(Some(true)),
        "n" | "N" => Ok(Some(false)),
        _ => Err(FieldError::Convertible),
    }
}

pub fn parse_menu_choice(raw: &str) -> Result<MenuChoice, FieldError> {
    match raw.trim() {
        "0" => Ok(MenuChoice::Exit),
        "1" => Ok(MenuChoice::List),
        "2" => Ok(MenuChoice::Add),
        "3" => Ok(MenuChoice::Delete),
        "4" => Ok(MenuChoice::Update),
        _ => Err(FieldError::MenuChoice),
    }
}

/// Ask `prompt` until `parse` accepts the answer. Rejections print the
/// parser's message and loop; only terminal I/O errors escape.
pub fn ask_until<C, T, F>(console: &mut C, prompt: &str, mut parse: F) -> io::Result<T>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Result<T, FieldError>,
{
    loop {
        let raw = console.read_line(prompt)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!(prompt, error = %err, "input rejected");
                console.show(Tone::Warning, &err.to_string());
            }
        }
    }
}

pub fn prompt_id<C: Console + ?Sized>(console: &mut C) -> io::Result<Option<String>> {
    ask_until(
        console,
        "Enter a car ID (only integer numbers are allowed)",
        parse_id,
    )
}

pub fn prompt_name<C: Console + ?Sized>(console: &mut C, what: &'static str) -> io::Result<String> {
    ask_until(console, &format!("Enter a car {}", what), |raw| {
        parse_name(raw, what)
    })
}

pub fn prompt_year<C: Console + ?Sized>(console: &mut C) -> io::Result<u16> {
    ask_until(console, "Car production year", parse_year)
}

/// With `allow_unset` false an empty answer is refused, which is what a
/// create record needs.
pub fn prompt_convertible<C: Console + ?Sized>(
    console: &mut C,
    allow_unset: bool,
) -> io::Result<Option<bool>> {
    ask_until(console, "Is this car convertible? [y/n]", |raw| {
        match parse_convertible(raw)? {
            None if !allow_unset => Err(FieldError::Convertible),
            answer => Ok(answer),
        }
    })
}

pub fn prompt_menu_choice<C: Console + ?Sized>(console: &mut C) -> io::Result<MenuChoice> {
    let choice = ask_until(console, "Enter your choice (0..4)", parse_menu_choice)?;
    tracing::debug!(?choice, "menu choice accepted");
    Ok(choice)
}
