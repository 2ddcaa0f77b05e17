// Session loop: probe, show the menu, dispatch, repeat.
//
// The loop is an explicit state machine. Every cycle starts with a fresh
// probe, so an operation is never dispatched against a stale snapshot.

use std::io;
use std::process::ExitCode;

use crate::api::Transport;
use crate::builder::RecordBuilder;
use crate::client::{self, Outcome, VehicleApi};
use crate::model::Vehicle;
use crate::probe::ProbeOutcome;
use crate::ui::{render_menu, Console, Tone};
use crate::validate::{prompt_id, prompt_menu_choice, MenuChoice};

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The user picked `0`.
    Success,
    /// A probe found the store unusable.
    Unreachable,
}

impl SessionExit {
    pub fn code(self) -> u8 {
        match self {
            SessionExit::Success => 0,
            SessionExit::Unreachable => 1,
        }
    }
}

impl From<SessionExit> for ExitCode {
    fn from(exit: SessionExit) -> Self {
        ExitCode::from(exit.code())
    }
}

#[derive(Debug)]
enum State {
    Probing,
    MenuWait(Vec<Vehicle>),
    Dispatch(MenuChoice, Vec<Vehicle>),
    Terminated(SessionExit),
}

pub struct Session<T, C> {
    api: VehicleApi<T>,
    console: C,
    /// Id filter for the first probe only; later probes check connectivity.
    startup_filter: Option<String>,
}

impl<T: Transport, C: Console> Session<T, C> {
    pub fn new(api: VehicleApi<T>, console: C, startup_filter: Option<String>) -> Self {
        Session {
            api,
            console,
            startup_filter,
        }
    }

    /// Drive the loop until the user exits or a probe fails. Only terminal
    /// I/O errors are returned as `Err`.
    pub fn run(&mut self) -> io::Result<SessionExit> {
        let mut state = State::Probing;
        loop {
            state = match state {
                State::Probing => self.probe_step(),
                State::MenuWait(snapshot) => {
                    self.console.show(Tone::Plain, &render_menu());
                    let choice = prompt_menu_choice(&mut self.console)?;
                    let echo = format!("You entered {}.", choice_digit(choice));
                    self.console.show(Tone::Plain, &echo);
                    State::Dispatch(choice, snapshot)
                }
                State::Dispatch(choice, snapshot) => self.dispatch(choice, &snapshot)?,
                State::Terminated(exit) => {
                    tracing::info!(?exit, "session terminated");
                    return Ok(exit);
                }
            };
        }
    }

    fn probe_step(&mut self) -> State {
        let filter = self.startup_filter.take();
        match self.api.probe(filter.as_deref()) {
            ProbeOutcome::Reachable(snapshot) => {
                self.console.show(Tone::Plain, "Server is running.");
                State::MenuWait(snapshot)
            }
            ProbeOutcome::ReachableWithId(snapshot) => {
                let wanted = filter.unwrap_or_default();
                self.console.show(
                    Tone::Plain,
                    &format!("Server is running. The car id {} is in the database.", wanted),
                );
                State::MenuWait(snapshot)
            }
            ProbeOutcome::ReachableWithoutId { wanted } => {
                self.console.show(
                    Tone::Warning,
                    &format!("The car id {} is not in the database.", wanted),
                );
                self.quit_unreachable()
            }
            ProbeOutcome::Unreachable(failure) => {
                self.console.show(Tone::Error, &failure.to_string());
                self.quit_unreachable()
            }
        }
    }

    fn quit_unreachable(&mut self) -> State {
        self.console.show(Tone::Error, "Server is not responding - quitting!");
        State::Terminated(SessionExit::Unreachable)
    }

    fn dispatch(&mut self, choice: MenuChoice, snapshot: &[Vehicle]) -> io::Result<State> {
        let outcome = match choice {
            MenuChoice::Exit => {
                self.console.show(Tone::Plain, "You exit the program. Bye!");
                return Ok(State::Terminated(SessionExit::Success));
            }
            MenuChoice::List => client::list(snapshot),
            MenuChoice::Add => {
                let payload = RecordBuilder::new(&mut self.console).build_new()?;
                self.api.create(&payload)
            }
            MenuChoice::Delete => match prompt_id(&mut self.console)? {
                Some(id) => self.api.delete(&id),
                None => Outcome::MissingId,
            },
            MenuChoice::Update => match prompt_id(&mut self.console)? {
                Some(id) => {
                    let payload = RecordBuilder::new(&mut self.console).build_update()?;
                    self.api.update(&id, &payload)
                }
                None => Outcome::MissingId,
            },
        };
        tracing::info!(?choice, success = outcome.is_success(), "operation finished");
        self.console.show(outcome.tone(), &outcome.to_string());
        Ok(State::Probing)
    }
}

fn choice_digit(choice: MenuChoice) -> u8 {
    match choice {
        MenuChoice::Exit => 0,
        MenuChoice::List => 1,
        MenuChoice::Add => 2,
        MenuChoice::Delete => 3,
        MenuChoice::Update => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::api::Endpoint;
    use crate::error::TransportError;
    use crate::ui::scripted::ScriptedConsole;
    use reqwest::Method;

    const ONE_CAR: &str =
        r#"[{"id": "1", "brand": "Ford", "model": "Model T", "production_year": 1927, "convertible": false}]"#;

    fn run(
        transport: &FakeTransport,
        answers: &[&str],
        filter: Option<&str>,
    ) -> (io::Result<SessionExit>, ScriptedConsole) {
        let api = VehicleApi::new(transport, Endpoint::new("host", 8080, "vehicles"));
        let mut console = ScriptedConsole::new(answers.iter().copied());
        let exit = Session::new(api, &mut console, filter.map(String::from)).run();
        (exit, console)
    }

    #[test]
    fn exit_choice_ends_with_success() {
        let transport = FakeTransport::new().reply(200, "[]");
        let (exit, console) = run(&transport, &["9", "0"], None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.saw("Please enter a number 0..4"));
        assert!(console.saw("Bye!"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn startup_filter_missing_id_exits_unreachable() {
        let transport = FakeTransport::new().reply(200, ONE_CAR);
        let (exit, console) = run(&transport, &[], Some("3"));

        assert_eq!(exit.unwrap(), SessionExit::Unreachable);
        assert_eq!(SessionExit::Unreachable.code(), 1);
        assert!(console.saw("The car id 3 is not in the database."));
        assert!(console.saw("Server is not responding - quitting!"));
        assert!(console.prompts.is_empty());
    }

    #[test]
    fn startup_filter_applies_to_the_first_probe_only() {
        // The second probe would fail the filter if it were still applied.
        let transport = FakeTransport::new()
            .reply(200, ONE_CAR)
            .reply(200, "[]");
        let (exit, _) = run(&transport, &["1", "0"], Some("1"));
        assert_eq!(exit.unwrap(), SessionExit::Success);
    }

    #[test]
    fn every_cycle_reprobes_before_the_menu() {
        let transport = FakeTransport::new()
            .reply(200, "[]")
            .reply(200, ONE_CAR)
            .reply(200, ONE_CAR);
        let (exit, console) = run(&transport, &["1", "1", "0"], None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.saw("*** Database is empty ***"));
        assert!(console.saw("Model T"));
        // A third probe happens before the exit choice is read.
        assert_eq!(transport.sent().len(), 3);
        assert!(transport.sent().iter().all(|r| r.method == Method::GET));
    }

    #[test]
    fn probe_failure_mid_session_terminates() {
        let transport = FakeTransport::new()
            .reply(200, "[]")
            .fail(TransportError::Connect("refused".into()));
        let (exit, console) = run(&transport, &["1"], None);

        assert_eq!(exit.unwrap(), SessionExit::Unreachable);
        assert!(console.saw("Could not connect to the server"));
    }

    #[test]
    fn add_posts_the_built_record() {
        let transport = FakeTransport::new()
            .reply(200, "[]")
            .reply(201, "{}")
            .reply(200, ONE_CAR);
        let answers = ["2", "", "Ford", "Model T", "1927", "n", "0"];
        let (exit, console) = run(&transport, &answers, None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.saw("has been posted to the vehicle database"));
        let post = &transport.sent()[1];
        assert_eq!(post.method, Method::POST);
        assert!(post.body.as_ref().unwrap()["id"].is_null());
    }

    #[test]
    fn delete_with_empty_id_issues_no_request() {
        let transport = FakeTransport::new().reply(200, "[]").reply(200, "[]");
        let (exit, console) = run(&transport, &["3", "", "0"], None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.saw("A car ID is required"));
        assert!(transport.sent().iter().all(|r| r.method == Method::GET));
    }

    #[test]
    fn update_reports_not_found() {
        let transport = FakeTransport::new()
            .reply(200, ONE_CAR)
            .reply(404, "")
            .reply(200, ONE_CAR);
        let answers = ["4", "7", "Ford", "Model A", "1930", "", "0"];
        let (exit, console) = run(&transport, &answers, None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.saw("No entry found with the id of 7."));
        let put = &transport.sent()[1];
        assert_eq!(put.method, Method::PUT);
        assert_eq!(put.url, "http://host:8080/vehicles/7");
    }

    #[test]
    fn update_with_empty_id_skips_field_prompts() {
        let transport = FakeTransport::new().reply(200, "[]").reply(200, "[]");
        let (exit, console) = run(&transport, &["4", "", "0"], None);

        assert_eq!(exit.unwrap(), SessionExit::Success);
        assert!(console.prompts.iter().all(|p| !p.contains("brand")));
    }

    #[test]
    fn closed_input_is_an_io_error() {
        let transport = FakeTransport::new().reply(200, "[]");
        let (exit, _) = run(&transport, &[], None);
        assert_eq!(exit.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
