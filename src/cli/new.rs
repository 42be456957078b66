//! `kira new` - create a work item from a template
//!
//! Orchestrates the template engine, the id allocator and the validator to
//! produce one new, valid item file. Interactive answers come through the
//! [`InputSource`] trait so the orchestration logic is testable without a
//! real terminal.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use thiserror::Error;

use super::output::Output;
use crate::domain::{kebab_case, Input, InputType, Template, CREATED_FORMAT};
use crate::storage::{next_id, Workspace};

#[derive(Debug, Error)]
pub enum CreateError {
    #[error(
        "ambiguous arguments: neither '{first}' nor '{second}' is a valid status (valid: {valid})"
    )]
    AmbiguousArguments {
        first: String,
        second: String,
        valid: String,
    },

    #[error("invalid status '{status}' (valid: {valid})")]
    InvalidStatus { status: String, valid: String },

    #[error("unknown template '{template}' (available: {available})")]
    UnknownTemplate {
        template: String,
        available: String,
    },

    #[error("title is required (provide as argument or use --interactive)")]
    MissingTitle,

    #[error("template must be specified when using --help-inputs")]
    HelpInputsNeedsTemplate,

    #[error("cannot create work item at {path}: {source}")]
    Creation { path: PathBuf, source: io::Error },
}

/// One creation request, resolved from the command line.
#[derive(Debug, Default)]
pub struct NewOptions {
    pub template: Option<String>,
    /// Second positional: status or title, in either order.
    pub arg2: Option<String>,
    /// Third positional: title or status, in either order.
    pub arg3: Option<String>,
    pub description: Option<String>,
    pub interactive: bool,
    /// Direct `--input key=value` pairs; highest precedence.
    pub inputs: Vec<(String, String)>,
    pub help_inputs: bool,
}

/// Source of interactive answers. Production reads stdin; tests supply a
/// scripted source.
pub trait InputSource {
    /// Displays `prompt` and reads one line of input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from the terminal, blocking until a line is available.
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;

        Ok(line.trim().to_string())
    }
}

pub fn run(opts: NewOptions, output: &Output) -> Result<()> {
    let ws = Workspace::open_current()?;
    create_item(&ws, opts, &mut StdinSource, output)
}

/// Creates one work item. Split from [`run`] so tests can inject a
/// workspace and a scripted input source.
pub fn create_item(
    ws: &Workspace,
    opts: NewOptions,
    source: &mut dyn InputSource,
    output: &Output,
) -> Result<()> {
    let config = ws.config();
    let valid = config.status_names().join(", ");

    // Disambiguate the status/title positionals: whichever of the second
    // and third arguments names a configured status is the status, the
    // other is the title. Refusing both avoids silently misfiling the item.
    let mut status: Option<&str> = None;
    let mut title: Option<&str> = None;

    if let Some(a) = opts.arg2.as_deref() {
        if config.statuses.contains_key(a) {
            status = Some(a);
        } else {
            title = Some(a);
        }
    }

    if let Some(b) = opts.arg3.as_deref() {
        if status.is_none() {
            if config.statuses.contains_key(b) {
                status = Some(b);
            } else if title.is_none() {
                title = Some(b);
            } else {
                return Err(CreateError::AmbiguousArguments {
                    first: opts.arg2.clone().unwrap_or_default(),
                    second: b.to_string(),
                    valid,
                }
                .into());
            }
        } else if title.is_none() {
            title = Some(b);
        }
    }

    let template_name = match opts.template.clone() {
        Some(name) => name,
        None => {
            if opts.help_inputs {
                return Err(CreateError::HelpInputsNeedsTemplate.into());
            }
            select_template(ws, source)?
        }
    };

    let template_path =
        ws.template_path(&template_name)
            .ok_or_else(|| CreateError::UnknownTemplate {
                template: template_name.clone(),
                available: config.kind_names().join(", "),
            })?;

    let template = Template::load(&template_path)?;

    if opts.help_inputs {
        show_inputs(&template_name, &template, output);
        return Ok(());
    }

    let title = match title {
        Some(t) => t.to_string(),
        None if opts.interactive => prompt_title(source)?,
        None => return Err(CreateError::MissingTitle.into()),
    };

    let status = status.unwrap_or(&config.default_status).to_string();
    if !config.statuses.contains_key(&status) {
        return Err(CreateError::InvalidStatus { status, valid }.into());
    }

    let alloc = next_id(&ws.work_dir(), config)?;
    for path in &alloc.skipped {
        output.warn(&format!(
            "skipping unparsable item file name: {}",
            path.display()
        ));
    }

    // Input precedence, highest first: --input pairs, then the positional
    // description, then the computed fields.
    let mut values: BTreeMap<String, String> = BTreeMap::new();
    values.insert("id".to_string(), alloc.id.clone());
    values.insert("title".to_string(), title.clone());
    values.insert("status".to_string(), status.clone());
    values.insert(
        "created".to_string(),
        Local::now().format(CREATED_FORMAT).to_string(),
    );

    if let Some(desc) = opts.description.as_deref().filter(|d| !d.is_empty()) {
        if !opts.inputs.iter().any(|(k, _)| k == "description") {
            values.insert("description".to_string(), desc.to_string());
        }
    }

    for (key, value) in &opts.inputs {
        values.insert(key.clone(), value.clone());
    }

    // Check supplied values against the declared input types before
    // anything touches the filesystem.
    for input in template.inputs() {
        if let Some(value) = values.get(&input.name) {
            input.check(value)?;
        }
    }

    if opts.interactive {
        for input in template.inputs() {
            if !values.contains_key(&input.name) {
                let value = prompt_input(input, source)?;
                values.insert(input.name.clone(), value);
            }
        }
    }

    let content = template.render(&values);

    let folder = config
        .folder_for(&status)
        .ok_or_else(|| CreateError::InvalidStatus {
            status: status.clone(),
            valid: config.status_names().join(", "),
        })?;

    let dir = ws.status_dir(folder);
    fs::create_dir_all(&dir).map_err(|source| CreateError::Creation {
        path: dir.clone(),
        source,
    })?;

    let file_name = format!("{}-{}.{}.md", alloc.id, kebab_case(&title), template_name);
    let path = dir.join(file_name);

    fs::write(&path, content).map_err(|source| CreateError::Creation {
        path: path.clone(),
        source,
    })?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": alloc.id,
            "title": title,
            "status": status,
            "kind": template_name,
            "path": path.display().to_string(),
        }));
    } else {
        output.success(&format!("Created work item {} in {}", alloc.id, folder));
    }

    Ok(())
}

/// Prompts for a template by numbered selection, re-asking on invalid
/// choices.
fn select_template(ws: &Workspace, source: &mut dyn InputSource) -> Result<String> {
    let kinds = ws.config().kind_names();

    let mut prompt = String::from("Available templates:\n");
    for (i, kind) in kinds.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, kind));
    }
    prompt.push_str("Select template (number): ");

    loop {
        let line = source.read_line(&prompt)?;
        if let Ok(choice) = line.trim().parse::<usize>() {
            if (1..=kinds.len()).contains(&choice) {
                return Ok(kinds[choice - 1].to_string());
            }
        }
    }
}

fn prompt_title(source: &mut dyn InputSource) -> Result<String> {
    loop {
        let title = source.read_line("Enter work item title: ")?;
        if !title.trim().is_empty() {
            return Ok(title.trim().to_string());
        }
    }
}

/// Prompts for one declared input, re-asking until the value satisfies the
/// declared type.
fn prompt_input(input: &Input, source: &mut dyn InputSource) -> Result<String> {
    match input.input_type {
        InputType::String if !input.options.is_empty() => {
            let mut prompt = format!("Enter {} ({})\n", input.name, input.description);
            for (i, option) in input.options.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, option));
            }
            prompt.push_str("Select option (number): ");

            loop {
                let line = source.read_line(&prompt)?;
                if let Ok(choice) = line.trim().parse::<usize>() {
                    if (1..=input.options.len()).contains(&choice) {
                        return Ok(input.options[choice - 1].clone());
                    }
                }
            }
        }
        InputType::String => source.read_line(&format!("Enter {} ({}): ", input.name, input.description)),
        InputType::Number => {
            let prompt = format!("Enter {} ({}): ", input.name, input.description);
            loop {
                let line = source.read_line(&prompt)?;
                if input.check(&line).is_ok() {
                    return Ok(line.trim().to_string());
                }
            }
        }
        InputType::Datetime => {
            let layout = input.format.as_deref().unwrap_or(CREATED_FORMAT);
            let prompt = format!(
                "Enter {} ({}) (format: {}): ",
                input.name, input.description, layout
            );
            loop {
                let line = source.read_line(&prompt)?;
                if input.check(&line).is_ok() {
                    return Ok(line.trim().to_string());
                }
            }
        }
    }
}

/// Lists a template's declared inputs (`--help-inputs`).
fn show_inputs(name: &str, template: &Template, output: &Output) {
    if output.is_json() {
        let items: Vec<_> = template
            .inputs()
            .iter()
            .map(|i| {
                serde_json::json!({
                    "name": i.name,
                    "type": i.input_type.as_str(),
                    "description": i.description,
                    "options": i.options,
                    "format": i.format,
                })
            })
            .collect();
        output.data(&items);
        return;
    }

    println!("Available inputs for template '{}':", name);
    for input in template.inputs() {
        println!(
            "- {} ({}): {}",
            input.name,
            input.input_type.as_str(),
            input.description
        );
        if !input.options.is_empty() {
            println!("  Options: {}", input.options.join(", "));
        }
        if let Some(format) = &input.format {
            println!("  Format: {}", format);
        }
    }
}
