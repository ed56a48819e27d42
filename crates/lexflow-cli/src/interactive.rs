//! Line-oriented session over the shell state machine.
//!
//! Each screen reads from `input` and writes to `output`, so a whole session
//! can be scripted in tests. End of input ends the session.

use lexflow_core::models::{
    MatterChoice, MatterPicklist, WorkflowField, WorkflowFields, WorkflowForm, WorkflowId,
};
use lexflow_core::{ErrorMetadata, Screen, Shell, ShellEvent};
use lexflow_services::Attachment;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::files::{load_attachment, parse_path_list};
use crate::{truncate_label, Services};

const LABEL_WIDTH: usize = 60;

/// Whether the loop should keep going after a screen.
enum Flow {
    Continue,
    Quit,
}

pub struct InteractiveSession<R, W> {
    shell: Shell,
    services: Services,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveSession<R, W> {
    pub fn new(services: Services, input: R, output: W) -> Self {
        Self {
            shell: Shell::new(),
            services,
            input,
            output,
        }
    }

    pub fn screen(&self) -> Screen {
        self.shell.screen()
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let flow = match self.shell.screen() {
                Screen::LoggedOut => self.login_screen()?,
                Screen::Dashboard => self.dashboard_screen()?,
                Screen::WorkflowForm(id) => self.form_screen(id).await?,
            };
            if let Flow::Quit = flow {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }
        }
    }

    /// `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn apply(&mut self, event: ShellEvent) -> anyhow::Result<()> {
        if let Err(e) = self.shell.handle(event) {
            writeln!(self.output, "{}", e)?;
        }
        Ok(())
    }

    fn login_screen(&mut self) -> anyhow::Result<Flow> {
        writeln!(self.output, "\nLegal Workflow Portal - sign in")?;

        let Some(username) = self.prompt("Username: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(Flow::Quit);
        };

        self.apply(ShellEvent::Login { username, password })?;
        Ok(Flow::Continue)
    }

    fn dashboard_screen(&mut self) -> anyhow::Result<Flow> {
        let username = self
            .shell
            .session()
            .map(|s| s.username().to_string())
            .unwrap_or_default();
        writeln!(self.output, "\nWelcome, {}. Choose a workflow:", username)?;

        let catalog = self.services.submissions.catalog();
        let entries: Vec<(WorkflowId, String)> = catalog
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let marker = if w.is_configured() { "" } else { " (not configured)" };
                (
                    w.id,
                    format!("  {}. {} - {}{}", i + 1, w.title, w.description, marker),
                )
            })
            .collect();
        for (_, line) in &entries {
            writeln!(self.output, "{}", line)?;
        }

        let Some(choice) = self.prompt("Workflow number, 'logout' or 'exit': ")? else {
            return Ok(Flow::Quit);
        };
        let choice = choice.trim();

        match choice {
            "exit" | "quit" => return Ok(Flow::Quit),
            "logout" => self.apply(ShellEvent::Logout)?,
            _ => {
                let selected = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| entries.get(i).map(|(id, _)| *id))
                    .or_else(|| choice.parse::<WorkflowId>().ok());
                match selected {
                    Some(id) => self.apply(ShellEvent::SelectWorkflow(id))?,
                    None => writeln!(self.output, "Unknown choice: {}", choice)?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn form_screen(&mut self, workflow: WorkflowId) -> anyhow::Result<Flow> {
        writeln!(self.output, "\n{}", workflow.title())?;

        let picklist = self.services.clio.lookup().await;
        if let MatterPicklist::Unavailable { reason } = &picklist {
            writeln!(self.output, "Matter list unavailable: {}", reason)?;
        }
        for (i, matter) in picklist.matters().iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {}",
                i + 1,
                truncate_label(&matter.label(), LABEL_WIDTH)
            )?;
        }
        writeln!(self.output, "  other. Enter a matter not listed")?;

        let Some(selection) = self.prompt("Matter (number, 'other', text, or 'back'): ")? else {
            return Ok(Flow::Quit);
        };
        let selection = selection.trim().to_string();
        if selection == "back" {
            self.apply(ShellEvent::Back)?;
            return Ok(Flow::Continue);
        }

        let matter = match selection.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(i) if i < picklist.matters().len() => {
                MatterChoice::Listed(picklist.matters()[i].label())
            }
            _ if selection == lexflow_core::constants::OTHER_MATTER => {
                let Some(text) = self.prompt("Describe the matter: ")? else {
                    return Ok(Flow::Quit);
                };
                MatterChoice::from_selection(&selection, Some(&text))
            }
            _ => MatterChoice::Listed(selection),
        };

        let mut fields = WorkflowFields::default();
        for field in workflow.declared_fields() {
            match field {
                WorkflowField::StowersDemand => {
                    let Some(answer) = self.prompt("Stowers demand? [y/N]: ")? else {
                        return Ok(Flow::Quit);
                    };
                    fields.stowers_demand =
                        Some(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"));
                }
                WorkflowField::MotionType => {
                    let Some(answer) = self.prompt("Motion type: ")? else {
                        return Ok(Flow::Quit);
                    };
                    fields.motion_type = Some(answer);
                }
            }
        }

        let Some(notes) = self.prompt("Notes: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(paths) = self.prompt("Files (comma-separated paths, blank for none): ")? else {
            return Ok(Flow::Quit);
        };

        let mut attachments: Vec<Attachment> = Vec::new();
        for path in parse_path_list(&paths) {
            match load_attachment(Path::new(path)).await {
                Ok(a) => attachments.push(a),
                Err(e) => {
                    writeln!(self.output, "{:#}", e)?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let form = WorkflowForm::new(matter)
            .with_notes(notes)
            .with_fields(fields);
        let username = self
            .shell
            .session()
            .map(|s| s.username().to_string())
            .unwrap_or_default();

        match self
            .services
            .submissions
            .submit(&username, workflow, &form, &attachments)
            .await
        {
            Ok(receipt) if receipt.delivery.is_delivered() => {
                writeln!(
                    self.output,
                    "Workflow submitted successfully! {} of {} file(s) uploaded.",
                    receipt.uploaded.len(),
                    attachments.len()
                )?;
                self.apply(ShellEvent::Submitted)?;
            }
            Ok(receipt) => {
                writeln!(
                    self.output,
                    "Error submitting workflow: {}. Please try again.",
                    receipt.delivery
                )?;
            }
            Err(e) => {
                writeln!(self.output, "{}", e.client_message())?;
            }
        }
        Ok(Flow::Continue)
    }
}
