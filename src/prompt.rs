//! Numbered menus for settings left out of both the command line and the
//! config file.

use std::io::{BufRead, Write};

use crate::correct::CorrectionModel;
use crate::error::ConfigError;
use crate::export::ExportSpace;

/// Source of answers for interactive selections.
pub trait Prompter {
    /// Show `menu` and return the raw answer line.
    fn ask(&mut self, menu: &str) -> Result<String, ConfigError>;
}

/// Prompts on a reader/writer pair, normally stdin/stderr.
#[derive(Debug)]
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, menu: &str) -> Result<String, ConfigError> {
        write!(self.output, "{menu}").map_err(ConfigError::Prompt)?;
        self.output.flush().map_err(ConfigError::Prompt)?;
        let mut line = String::new();
        self.input.read_line(&mut line).map_err(ConfigError::Prompt)?;
        Ok(line.trim().to_string())
    }
}

/// Refuses to prompt; used when stdin is not available to the run.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn ask(&mut self, _menu: &str) -> Result<String, ConfigError> {
        Err(ConfigError::Missing("selection (interactive prompts are disabled)"))
    }
}

pub const MODEL_MENU: &str = "\nChoose the correction method:\n\
    1. Uniform correction\n\
    2. Proportional correction\n\
    3. Both corrections\n\
    Select 1, 2 or 3: ";

pub const EXPORT_MENU: &str = "Save in planar (1) or geographic (2) coordinates? ";

pub fn ask_model(prompter: &mut dyn Prompter) -> Result<CorrectionModel, ConfigError> {
    let answer = prompter.ask(MODEL_MENU)?;
    CorrectionModel::from_name(&answer).ok_or(ConfigError::InvalidSelection {
        what: "correction model",
        value: answer,
        expected: "1/uniform, 2/proportional, 3/composed",
    })
}

pub fn ask_export_space(prompter: &mut dyn Prompter) -> Result<ExportSpace, ConfigError> {
    let answer = prompter.ask(EXPORT_MENU)?;
    ExportSpace::from_name(&answer).ok_or(ConfigError::InvalidSelection {
        what: "export space",
        value: answer,
        expected: "1/planar, 2/geographic",
    })
}
