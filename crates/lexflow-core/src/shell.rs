//! Interactive session state machine
//!
//! Screens move `LoggedOut -> Dashboard -> WorkflowForm(id) -> Dashboard`,
//! and `Dashboard -> LoggedOut` on logout. Any other event is rejected and
//! leaves the current screen untouched.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::auth::Session;
use crate::models::WorkflowId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    LoggedOut,
    Dashboard,
    WorkflowForm(WorkflowId),
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Screen::LoggedOut => write!(f, "login"),
            Screen::Dashboard => write!(f, "dashboard"),
            Screen::WorkflowForm(id) => write!(f, "workflow form ({})", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Login { username: String, password: String },
    SelectWorkflow(WorkflowId),
    /// Back or cancel from a form
    Back,
    /// The form was submitted successfully
    Submitted,
    Logout,
}

impl ShellEvent {
    fn name(&self) -> &'static str {
        match self {
            ShellEvent::Login { .. } => "login",
            ShellEvent::SelectWorkflow(_) => "select a workflow",
            ShellEvent::Back => "go back",
            ShellEvent::Submitted => "submit",
            ShellEvent::Logout => "log out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    #[error("Cannot {event} from the {screen} screen")]
    NotAllowed { screen: Screen, event: &'static str },
}

/// Current screen plus the session that unlocked it.
#[derive(Debug, Default)]
pub struct Shell {
    screen: Screen,
    session: Option<Session>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Apply an event. On error the state is unchanged.
    pub fn handle(&mut self, event: ShellEvent) -> Result<Screen, TransitionError> {
        let next = match (self.screen, &event) {
            (Screen::LoggedOut, ShellEvent::Login { username, password }) => {
                let session = Session::open(username, password)
                    .ok_or(TransitionError::InvalidCredentials)?;
                self.session = Some(session);
                Screen::Dashboard
            }
            (Screen::Dashboard, ShellEvent::SelectWorkflow(id)) => Screen::WorkflowForm(*id),
            (Screen::WorkflowForm(_), ShellEvent::Back | ShellEvent::Submitted) => {
                Screen::Dashboard
            }
            (Screen::Dashboard, ShellEvent::Logout) => {
                self.session = None;
                Screen::LoggedOut
            }
            (screen, event) => {
                return Err(TransitionError::NotAllowed {
                    screen,
                    event: event.name(),
                })
            }
        };

        self.screen = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(username: &str, password: &str) -> ShellEvent {
        ShellEvent::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn starts_logged_out() {
        let shell = Shell::new();
        assert_eq!(shell.screen(), Screen::LoggedOut);
        assert!(shell.session().is_none());
    }

    #[test]
    fn bad_credentials_keep_login_screen() {
        let mut shell = Shell::new();
        assert_eq!(
            shell.handle(login("test", "nope")),
            Err(TransitionError::InvalidCredentials)
        );
        assert_eq!(shell.screen(), Screen::LoggedOut);
        assert!(shell.session().is_none());
    }

    #[test]
    fn full_round_trip() {
        let mut shell = Shell::new();
        assert_eq!(shell.handle(login("test", "pass")), Ok(Screen::Dashboard));
        assert_eq!(shell.session().map(|s| s.username()), Some("test"));

        assert_eq!(
            shell.handle(ShellEvent::SelectWorkflow(WorkflowId::Motion)),
            Ok(Screen::WorkflowForm(WorkflowId::Motion))
        );
        assert_eq!(shell.handle(ShellEvent::Submitted), Ok(Screen::Dashboard));

        shell
            .handle(ShellEvent::SelectWorkflow(WorkflowId::Petition))
            .unwrap();
        assert_eq!(shell.handle(ShellEvent::Back), Ok(Screen::Dashboard));

        assert_eq!(shell.handle(ShellEvent::Logout), Ok(Screen::LoggedOut));
        assert!(shell.session().is_none());
    }

    #[test]
    fn invalid_events_are_rejected_without_change() {
        let mut shell = Shell::new();
        let err = shell.handle(ShellEvent::Logout).unwrap_err();
        assert_eq!(err.to_string(), "Cannot log out from the login screen");
        assert_eq!(shell.screen(), Screen::LoggedOut);

        shell.handle(login("test", "pass")).unwrap();
        shell
            .handle(ShellEvent::SelectWorkflow(WorkflowId::Affidavit))
            .unwrap();

        assert!(shell.handle(ShellEvent::Logout).is_err());
        assert!(shell
            .handle(ShellEvent::SelectWorkflow(WorkflowId::Motion))
            .is_err());
        assert!(shell.handle(login("test", "pass")).is_err());
        assert_eq!(shell.screen(), Screen::WorkflowForm(WorkflowId::Affidavit));

        shell.handle(ShellEvent::Back).unwrap();
        assert!(shell.handle(ShellEvent::Submitted).is_err());
        assert_eq!(shell.screen(), Screen::Dashboard);
    }
}
