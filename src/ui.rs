// UI layer: the console seam plus the menu and table renderers.
//
// Everything that reads from or writes to the terminal goes through the
// `Console` trait so the session loop can be driven by a script in
// tests. The real implementation uses `dialoguer` for line input and
// `crossterm` for colouring outcome messages.

use std::io;

use crossterm::style::{style, Color, Stylize};
use dialoguer::Input;

use crate::model::Vehicle;

/// How a message should be presented. Only the terminal console cares;
/// scripted consoles just record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

/// Line-oriented terminal access used by every interactive flow.
pub trait Console {
    /// Show `prompt` and block until the user submits a line. Empty lines
    /// are returned as empty strings; validators decide what they mean.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print a message for the user.
    fn show(&mut self, tone: Tone, text: &str);
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        (**self).read_line(prompt)
    }

    fn show(&mut self, tone: Tone, text: &str) {
        (**self).show(tone, text)
    }
}

/// Console backed by the real terminal.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        // `allow_empty` matters: an empty id or convertible answer is a
        // valid reply for some fields.
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn show(&mut self, tone: Tone, text: &str) {
        match tone {
            Tone::Plain => println!("{}", text),
            Tone::Success => println!("{}", style(text).with(Color::Green)),
            Tone::Warning => println!("{}", style(text).with(Color::Yellow)),
            Tone::Error => println!("{}", style(text).with(Color::Red)),
        }
    }
}

const COLUMNS: [(&str, usize); 5] = [
    ("id", 10),
    ("brand", 20),
    ("model", 20),
    ("production_year", 15),
    ("convertible", 10),
];

/// Banner and operation menu shown before every choice.
pub fn render_menu() -> String {
    let rule = format!("+{}+", "-".repeat(50));
    [
        rule.clone(),
        "|              Vintage Cars Database               |".to_string(),
        rule,
        "M E N U".to_string(),
        "=".repeat(7),
        "1. List cars".to_string(),
        "2. Add new car".to_string(),
        "3. Delete car".to_string(),
        "4. Update car".to_string(),
        "0. Exit".to_string(),
    ]
    .join("\n")
}

/// Fixed-width table of the snapshot, one row per record.
pub fn render_table(vehicles: &[Vehicle]) -> String {
    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    let mut lines = vec![render_row(&header), "__".repeat(45)];
    for vehicle in vehicles {
        lines.push(render_row(&cells(vehicle)));
    }
    lines.join("\n")
}

fn cells(vehicle: &Vehicle) -> Vec<String> {
    vec![
        vehicle.id.clone().unwrap_or_else(|| "-".into()),
        vehicle.brand.clone(),
        vehicle.model.clone(),
        vehicle
            .production_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".into()),
        vehicle
            .convertible
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".into()),
    ]
}

fn render_row(cells: &[String]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format!("{:<width$}| ", cell, width = width))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;
    use std::io;

    use super::{Console, Tone};

    /// Replays canned answers and records everything shown.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
        pub shown: Vec<(Tone, String)>,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            ScriptedConsole {
                answers: answers.into_iter().map(Into::into).collect(),
                ..Default::default()
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }

        pub fn saw(&self, needle: &str) -> bool {
            self.shown.iter().any(|(_, text)| text.contains(needle))
        }

        pub fn count(&self, needle: &str) -> usize {
            self.shown
                .iter()
                .filter(|(_, text)| text.contains(needle))
                .count()
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn show(&mut self, tone: Tone, text: &str) {
            self.shown.push((tone, text.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: Some(id.into()),
            brand: "Bugatti".into(),
            model: "Type 35".into(),
            production_year: Some(1924),
            convertible: Some(true),
        }
    }

    #[test]
    fn table_pads_every_column() {
        let table = render_table(&[vehicle("12")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id        | brand               | model"));
        assert_eq!(lines[1].len(), 90);
        assert!(lines[2].starts_with("12        | Bugatti             | Type 35             | 1924           | true"));
    }

    #[test]
    fn table_marks_missing_values() {
        let mut sparse = vehicle("3");
        sparse.production_year = None;
        sparse.convertible = None;
        let table = render_table(&[sparse]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.contains("| -              | -"));
    }

    #[test]
    fn menu_lists_all_choices() {
        let menu = render_menu();
        for line in ["1. List cars", "2. Add new car", "3. Delete car", "4. Update car", "0. Exit"] {
            assert!(menu.contains(line), "missing {line}");
        }
    }
}
