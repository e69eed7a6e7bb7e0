//! Description of the external worker and how to invoke it.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::process::Command;

use leon::Template;
use serde::Deserialize;

use crate::config::{
    expand_working_directory, resolve_script_path, DEFAULT_INTERPRETER, DEFAULT_WORKER_SCRIPT,
    SCRIPT_PLACEHOLDER, TARGET_PLACEHOLDER,
};
use crate::error::{Error, Result};
use crate::request::LaunchRequest;

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_script() -> String {
    DEFAULT_WORKER_SCRIPT.to_string()
}

fn default_arguments() -> Vec<String> {
    vec![
        format!("{{{SCRIPT_PLACEHOLDER}}}"),
        format!("{{{TARGET_PLACEHOLDER}}}"),
    ]
}

/// The worker as read from the configuration file.
///
/// Every field has a default, so an empty file (or no file) describes
/// `python AudioTranscriber.py <target>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerDefinition {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_script")]
    pub script: String,
    /// Argument templates, each rendering to exactly one argument.
    #[serde(default = "default_arguments")]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub environment: Option<HashMap<String, String>>,
}

impl Default for WorkerDefinition {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            arguments: default_arguments(),
            working_directory: None,
            environment: None,
        }
    }
}

impl WorkerDefinition {
    /// Replaces the interpreter and script with any provided overrides.
    #[must_use]
    pub fn with_overrides(mut self, interpreter: Option<String>, script: Option<String>) -> Self {
        if let Some(interpreter) = interpreter {
            self.interpreter = interpreter;
        }

        if let Some(script) = script {
            self.script = script;
        }

        self
    }

    /// Checks that the definition can produce a usable invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter is empty, an argument template
    /// does not parse or uses an unknown key, or no argument passes the
    /// target on.
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(Error::EmptyInterpreter);
        }

        let mut references_target = false;

        for argument in &self.arguments {
            let template = Template::parse(argument)?;

            for key in template.keys() {
                match *key {
                    TARGET_PLACEHOLDER => references_target = true,
                    SCRIPT_PLACEHOLDER => {}
                    other => {
                        return Err(Error::UnknownPlaceholder(
                            other.to_string(),
                            argument.clone(),
                        ))
                    }
                }
            }
        }

        if !references_target {
            return Err(Error::MissingTargetPlaceholder(self.arguments.clone()));
        }

        Ok(())
    }

    /// Renders the argument list for one request.
    ///
    /// An argument that is exactly `{script}` or `{target}` is the path
    /// itself, byte for byte. A placeholder embedded in other text needs
    /// the path as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to parse or render, or embeds a
    /// path that is not valid UTF-8.
    pub fn render_arguments(&self, request: &LaunchRequest) -> Result<Vec<OsString>> {
        let script = resolve_script_path(&self.script);
        let paths = [
            (SCRIPT_PLACEHOLDER, script.as_path()),
            (TARGET_PLACEHOLDER, request.target_path()),
        ];

        self.arguments
            .iter()
            .map(|argument| render_argument(argument, &paths))
            .collect()
    }

    /// Builds the process for one request. Streams are left for the caller
    /// to configure.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is invalid.
    pub fn build_command(&self, request: &LaunchRequest) -> Result<Command> {
        self.validate()?;

        let mut command = Command::new(&self.interpreter);
        command.args(self.render_arguments(request)?);

        if let Some(working_directory) = expand_working_directory(&self.working_directory) {
            command.current_dir(working_directory);
        }

        if let Some(environment) = &self.environment {
            command.envs(environment);
        }

        Ok(command)
    }
}

fn render_argument(argument: &str, paths: &[(&str, &Path)]) -> Result<OsString> {
    let template = Template::parse(argument)?;

    let bare_key = argument
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'));
    if let Some((_, path)) = paths.iter().find(|(key, _)| bare_key == Some(*key)) {
        return Ok(path.as_os_str().to_owned());
    }

    let mut context: HashMap<&str, &str> = HashMap::new();
    for key in template.keys() {
        if let Some((_, path)) = paths.iter().find(|(name, _)| name == key) {
            let value = path.to_str().ok_or_else(|| Error::NonUtf8Path {
                placeholder: (*key).to_string(),
                argument: argument.to_string(),
                path: path.to_path_buf(),
            })?;
            context.insert(*key, value);
        }
    }

    Ok(template.render(&context)?.into())
}

impl Display for WorkerDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.interpreter, self.script)
    }
}
