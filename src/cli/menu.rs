//! The interactive, menu-driven session.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use petreg::{Kind, Registry};
use tracing::instrument;

use crate::cli::{prompt::Prompt, report, terminal::Colorize};

const MENU: &str = "
==== PET REGISTRY ====
1 - Register an animal
2 - List animals
3 - Find an animal by name
4 - Save to file
5 - Load from file
0 - Exit";

/// What the session should do after handling a choice.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// An interactive session over a registry and its data file.
pub struct Menu<R, W> {
    prompt: Prompt<R, W>,
    registry: Registry,
    data_file: PathBuf,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub const fn new(prompt: Prompt<R, W>, registry: Registry, data_file: PathBuf) -> Self {
        Self {
            prompt,
            registry,
            data_file,
        }
    }

    /// Shows the menu and handles choices until the user exits or the input
    /// runs out.
    ///
    /// Problems with individual operations are reported and the session
    /// carries on. Only a failure to talk to the terminal ends it early.
    #[instrument(skip(self), fields(data_file = %self.data_file.display()))]
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.prompt.say(MENU)?;
            let Some(choice) = self.prompt.ask("Choose an option: ")? else {
                break;
            };
            if self.handle(&choice)? == Flow::Exit {
                break;
            }
        }
        self.prompt.say("Goodbye!")?;
        Ok(())
    }

    fn handle(&mut self, choice: &str) -> anyhow::Result<Flow> {
        tracing::debug!(choice, "menu choice");
        match choice {
            "1" => return self.register(),
            "2" => report::list(self.prompt.output_mut(), &self.registry)?,
            "3" => return self.find(),
            "4" => self.save()?,
            "5" => self.load()?,
            "0" => return Ok(Flow::Exit),
            other => self
                .prompt
                .say(format!("⚠ Unknown option '{other}'.").warning())?,
        }
        Ok(Flow::Continue)
    }

    fn register(&mut self) -> anyhow::Result<Flow> {
        let Some(kind) = self.prompt.ask("Kind of animal (cat/dog): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt.ask("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt.ask_age("Age: ")? else {
            return Ok(Flow::Exit);
        };

        let parsed = match kind.parse::<Kind>() {
            Ok(parsed) => parsed,
            Err(e) => {
                self.prompt.say(format!("⚠ {e}").warning())?;
                return Ok(Flow::Continue);
            }
        };

        let question = format!("{} of the {}: ", parsed.attribute_label(), parsed);
        let Some(attribute) = self.prompt.ask(&question)? else {
            return Ok(Flow::Exit);
        };

        let animal = self.registry.register(&kind, &name, age, &attribute)?;
        let message = format!("✅ {} '{}' registered.", animal.kind(), animal.name());
        self.prompt.say(message.success())?;
        Ok(Flow::Continue)
    }

    fn find(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.prompt.ask("Name to look for: ")? else {
            return Ok(Flow::Exit);
        };
        report::matches(self.prompt.output_mut(), &self.registry, &name)?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> anyhow::Result<()> {
        match self.registry.save(&self.data_file) {
            Ok(()) => self.prompt.say(
                format!(
                    "✅ Saved {} animals to {}.",
                    self.registry.len(),
                    self.data_file.display()
                )
                .success(),
            )?,
            Err(e) => self.prompt.say(format!("⚠ Could not save: {e}").warning())?,
        }
        Ok(())
    }

    fn load(&mut self) -> anyhow::Result<()> {
        match self.registry.load(&self.data_file) {
            Ok(skipped) => {
                report::skipped(self.prompt.output_mut(), &self.data_file, &skipped)?;
                self.prompt.say(
                    format!(
                        "✅ Loaded {} animals from {}.",
                        self.registry.len(),
                        self.data_file.display()
                    )
                    .success(),
                )?;
            }
            Err(e) => self.prompt.say(format!("⚠ Could not load: {e}").warning())?,
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (Registry, W) {
        (self.registry, self.prompt.into_output())
    }
}
