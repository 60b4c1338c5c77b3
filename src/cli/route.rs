//! CLI route: the static command table, session state, and the
//! read-eval-print loop.
//!
//! One table serves both surfaces: `jadn <command> [args...]` dispatches a
//! single command and exits, and the interactive loop feeds typed lines
//! through the same lookup. The session owns the error ledger and flushes
//! it exactly once at teardown.

use crate::backend::{Backend, DataStyle, DetailLevel, JadnEngine, SchemaTarget};
use crate::cli::{help, output};
use crate::config::{AppConfig, Dirs, SessionMode};
use crate::error::ShellError;
use crate::files::{self, FileFilter};
use crate::ledger::ErrorLedger;
use crate::logging;
use crate::ops::{self, OpContext};
use crate::resolve::{self, Prompter, Resolution, StdinPrompter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// What the loop does after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// One row of the static command table.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub(crate) run: fn(&mut Session, &[String]) -> Result<Control, ShellError>,
}

const SCHEMA_V_USAGE: &str = "schema_v [schema_file]";
const SCHEMA_VB_USAGE: &str = "schema_vb";
const DATA_V_USAGE: &str = "data_v [schema_file] [data_file]";
const SCHEMA_C_USAGE: &str = "schema_c [schema_file] [target] [detail]";
const SCHEMA_CB_USAGE: &str = "schema_cb [target] [detail]";
const SCHEMA_R_USAGE: &str = "schema_r [schema_file]";
const DATA_C_USAGE: &str = "data_c [data_file] [style]";
const DATA_CB_USAGE: &str = "data_cb [style]";

/// Every command the shell understands, in help-listing order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "schema_v",
        usage: SCHEMA_V_USAGE,
        summary: "Validate a JADN schema from the schemas directory.",
        run: cmd_schema_v,
    },
    CommandSpec {
        name: "schema_vb",
        usage: SCHEMA_VB_USAGE,
        summary: "Validate every .jadn schema in the schemas directory.",
        run: cmd_schema_vb,
    },
    CommandSpec {
        name: "data_v",
        usage: DATA_V_USAGE,
        summary: "Validate a JSON data file against a JADN schema.",
        run: cmd_data_v,
    },
    CommandSpec {
        name: "schema_c",
        usage: SCHEMA_C_USAGE,
        summary: "Convert a JADN schema to jidl, json-schema, xsd, markdown, html, graphviz, or plantuml.",
        run: cmd_schema_c,
    },
    CommandSpec {
        name: "schema_cb",
        usage: SCHEMA_CB_USAGE,
        summary: "Convert every .jadn schema in the schemas directory.",
        run: cmd_schema_cb,
    },
    CommandSpec {
        name: "schema_r",
        usage: SCHEMA_R_USAGE,
        summary: "Reverse-translate a JIDL or JSON Schema file to JADN.",
        run: cmd_schema_r,
    },
    CommandSpec {
        name: "data_c",
        usage: DATA_C_USAGE,
        summary: "Re-encode a JSON data file as concise or verbose JSON.",
        run: cmd_data_c,
    },
    CommandSpec {
        name: "data_cb",
        usage: DATA_CB_USAGE,
        summary: "Re-encode every .json data file in the data directory.",
        run: cmd_data_cb,
    },
    CommandSpec {
        name: "ls_schemas",
        usage: "ls_schemas",
        summary: "List files in the schemas directory.",
        run: cmd_ls_schemas,
    },
    CommandSpec {
        name: "ls_data",
        usage: "ls_data",
        summary: "List files in the data directory.",
        run: cmd_ls_data,
    },
    CommandSpec {
        name: "gen_err_report",
        usage: "gen_err_report",
        summary: "Write the session error ledger to the dated CSV report.",
        run: cmd_gen_err_report,
    },
    CommandSpec {
        name: "read_err_report",
        usage: "read_err_report",
        summary: "Print the most recent error report.",
        run: cmd_read_err_report,
    },
    CommandSpec {
        name: "clear_err_report",
        usage: "clear_err_report",
        summary: "Clear the session error ledger and truncate the log file.",
        run: cmd_clear_err_report,
    },
    CommandSpec {
        name: "help",
        usage: "help [command]",
        summary: "List commands, or show help for one command.",
        run: cmd_help,
    },
    CommandSpec {
        name: "?",
        usage: "? [command]",
        summary: "Alias for help.",
        run: cmd_help,
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Print the tool version.",
        run: cmd_version,
    },
    CommandSpec {
        name: "clear",
        usage: "clear",
        summary: "Clear the screen.",
        run: cmd_clear,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Exit the JADN CLI.",
        run: cmd_exit,
    },
];

/// One shell session: mode, directories, backend, ledger, and prompter.
pub struct Session {
    mode: SessionMode,
    dirs: Dirs,
    backend: Box<dyn Backend>,
    ledger: ErrorLedger,
    prompter: Box<dyn Prompter>,
    log_file: PathBuf,
    torn_down: bool,
}

impl Session {
    /// Session over the built-in engine and real stdin prompts.
    pub fn new(config: &AppConfig, workspace_root: &Path) -> Session {
        let dirs = Dirs::resolve(workspace_root, &config.dirs);
        Session::with_parts(
            config.mode(),
            dirs,
            Box::new(JadnEngine::new()),
            Box::new(StdinPrompter),
            config.log_file_path(workspace_root),
        )
    }

    /// Constructor with every collaborator injectable.
    pub fn with_parts(
        mode: SessionMode,
        dirs: Dirs,
        backend: Box<dyn Backend>,
        prompter: Box<dyn Prompter>,
        log_file: PathBuf,
    ) -> Session {
        let ledger = ErrorLedger::new(dirs.output.clone());
        Session {
            mode,
            dirs,
            backend,
            ledger,
            prompter,
            log_file,
            torn_down: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn ledger(&self) -> &ErrorLedger {
        &self.ledger
    }

    /// Look a command up in the static table and run it. Unknown names are
    /// a user-input condition, never a ledger entry.
    pub fn dispatch(&mut self, name: &str, args: &[String]) -> Result<Control, ShellError> {
        match COMMANDS.iter().find(|spec| spec.name == name) {
            Some(spec) => {
                info!(command = spec.name, "Dispatching command");
                (spec.run)(self, args)
            }
            None => {
                let mut line = name.to_string();
                for arg in args {
                    line.push(' ');
                    line.push_str(arg);
                }
                Err(ShellError::UserInput(format!("*** Unknown syntax: {}", line)))
            }
        }
    }

    /// Split one typed line into command and arguments and dispatch it.
    /// Blank lines are a no-op.
    pub fn run_line(&mut self, line: &str) -> Result<Control, ShellError> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        match tokens.split_first() {
            Some((name, args)) => self.dispatch(name, args),
            None => Ok(Control::Continue),
        }
    }

    /// The interactive read-eval-print loop. Returns after `exit` or EOF;
    /// teardown runs on every path out.
    pub fn run_loop(&mut self) -> Result<(), ShellError> {
        let result = self.loop_inner();
        self.shutdown();
        result
    }

    fn loop_inner(&mut self) -> Result<(), ShellError> {
        println!("{}", help::intro_banner());
        loop {
            print!("(jadn) ");
            io::stdout().flush()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                // EOF on stdin ends the session like `exit`.
                println!();
                return Ok(());
            }
            match self.run_line(&line) {
                Ok(Control::Continue) => {}
                Ok(Control::Exit) => return Ok(()),
                Err(ShellError::UserInput(msg)) => println!("{}", msg),
                Err(err) => return Err(err),
            }
        }
    }

    /// Teardown hook: flushes the ledger to the dated report. Runs at most
    /// once per session however the session ends.
    pub fn shutdown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        info!("Session teardown");
        match self.ledger.flush() {
            Ok(Some(path)) => info!(report = %path.display(), "Flushed error ledger"),
            Ok(None) => {}
            Err(err) => eprintln!("Failed to write error report: {}", err),
        }
    }

    fn op_context(&mut self) -> OpContext<'_> {
        OpContext {
            backend: self.backend.as_ref(),
            ledger: &mut self.ledger,
            dirs: &self.dirs,
        }
    }

    fn resolve_schema(&mut self, token: Option<&String>, usage: &str) -> Result<String, ShellError> {
        resolve::resolve_file(
            token.map(String::as_str),
            &self.dirs.schemas,
            FileFilter::Extension("jadn"),
            self.mode,
            self.prompter.as_mut(),
            usage,
        )
    }

    /// Reverse translation accepts any file in the schemas directory; the
    /// backend decides which kinds it supports.
    fn resolve_foreign_schema(
        &mut self,
        token: Option<&String>,
        usage: &str,
    ) -> Result<String, ShellError> {
        resolve::resolve_file(
            token.map(String::as_str),
            &self.dirs.schemas,
            FileFilter::Any,
            self.mode,
            self.prompter.as_mut(),
            usage,
        )
    }

    fn resolve_data(&mut self, token: Option<&String>, usage: &str) -> Result<String, ShellError> {
        resolve::resolve_file(
            token.map(String::as_str),
            &self.dirs.data,
            FileFilter::Extension("json"),
            self.mode,
            self.prompter.as_mut(),
            usage,
        )
    }

    fn resolve_target(
        &mut self,
        token: Option<&String>,
        usage: &str,
    ) -> Result<SchemaTarget, ShellError> {
        let name = resolve::resolve_option(
            token.map(String::as_str),
            &SchemaTarget::NAMES,
            self.mode,
            self.prompter.as_mut(),
            usage,
        )?;
        SchemaTarget::from_name(&name)
            .ok_or_else(|| ShellError::UserInput(format!("Option '{}' is not valid.", name)))
    }

    fn resolve_style(
        &mut self,
        token: Option<&String>,
        usage: &str,
    ) -> Result<DataStyle, ShellError> {
        let name = resolve::resolve_option(
            token.map(String::as_str),
            &DataStyle::NAMES,
            self.mode,
            self.prompter.as_mut(),
            usage,
        )?;
        DataStyle::from_name(&name)
            .ok_or_else(|| ShellError::UserInput(format!("Option '{}' is not valid.", name)))
    }

    fn print_listing(&self, dir: &Path, filter: FileFilter) -> Result<Control, ShellError> {
        let listing = files::list_files(dir, filter)?;
        if listing.is_empty() {
            println!("No files found in the '{}' directory.", files::dir_label(dir));
        } else {
            println!("{}", files::listing_lines(dir, &listing));
        }
        Ok(Control::Continue)
    }
}

/// The detail suboption is optional, never prompted for, and meaningful
/// only for graph targets; anything else ignores it.
fn parse_detail(token: Option<&String>, target: SchemaTarget) -> Result<DetailLevel, ShellError> {
    let raw = match token {
        Some(raw) => raw,
        None => return Ok(DetailLevel::default()),
    };
    if !target.takes_detail() {
        return Ok(DetailLevel::default());
    }
    match resolve::resolve_token(raw, &DetailLevel::NAMES) {
        Resolution::Resolved(name) => Ok(DetailLevel::from_name(&name).unwrap_or_default()),
        Resolution::Cancelled => Err(ShellError::UserInput(resolve::CANCELLED.to_string())),
        Resolution::NotFound => Err(ShellError::UserInput(format!(
            "Option '{}' is not valid.",
            raw.trim()
        ))),
    }
}

fn cmd_schema_v(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let schema = session.resolve_schema(args.first(), SCHEMA_V_USAGE)?;
    let mut ctx = session.op_context();
    ops::schema_validate(&mut ctx, &schema);
    Ok(Control::Continue)
}

fn cmd_schema_vb(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    let dir = session.dirs.schemas.clone();
    let mut ctx = session.op_context();
    let summary = ops::run_bulk(&mut ctx, &dir, "jadn", |ctx, file| {
        ops::schema_validate(ctx, file)
    })?;
    println!("{}", summary);
    Ok(Control::Continue)
}

fn cmd_data_v(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let schema = session.resolve_schema(args.first(), DATA_V_USAGE)?;
    let data = session.resolve_data(args.get(1), DATA_V_USAGE)?;
    let mut ctx = session.op_context();
    ops::data_validate(&mut ctx, &schema, &data);
    Ok(Control::Continue)
}

fn cmd_schema_c(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let schema = session.resolve_schema(args.first(), SCHEMA_C_USAGE)?;
    let target = session.resolve_target(args.get(1), SCHEMA_C_USAGE)?;
    let detail = parse_detail(args.get(2), target)?;
    let mut ctx = session.op_context();
    ops::schema_convert(&mut ctx, &schema, target, detail);
    Ok(Control::Continue)
}

fn cmd_schema_cb(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let target = session.resolve_target(args.first(), SCHEMA_CB_USAGE)?;
    let detail = parse_detail(args.get(1), target)?;
    let dir = session.dirs.schemas.clone();
    let mut ctx = session.op_context();
    let summary = ops::run_bulk(&mut ctx, &dir, "jadn", |ctx, file| {
        ops::schema_convert(ctx, file, target, detail)
    })?;
    println!("{}", summary);
    Ok(Control::Continue)
}

fn cmd_schema_r(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let schema = session.resolve_foreign_schema(args.first(), SCHEMA_R_USAGE)?;
    let mut ctx = session.op_context();
    ops::schema_translate(&mut ctx, &schema);
    Ok(Control::Continue)
}

fn cmd_data_c(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let data = session.resolve_data(args.first(), DATA_C_USAGE)?;
    let style = session.resolve_style(args.get(1), DATA_C_USAGE)?;
    let mut ctx = session.op_context();
    ops::data_convert(&mut ctx, &data, style);
    Ok(Control::Continue)
}

fn cmd_data_cb(session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    let style = session.resolve_style(args.first(), DATA_CB_USAGE)?;
    let dir = session.dirs.data.clone();
    let mut ctx = session.op_context();
    let summary = ops::run_bulk(&mut ctx, &dir, "json", |ctx, file| {
        ops::data_convert(ctx, file, style)
    })?;
    println!("{}", summary);
    Ok(Control::Continue)
}

fn cmd_ls_schemas(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    session.print_listing(&session.dirs.schemas, FileFilter::Extension("jadn"))
}

fn cmd_ls_data(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    session.print_listing(&session.dirs.data, FileFilter::Any)
}

fn cmd_gen_err_report(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    match session.ledger.flush()? {
        Some(path) => println!("Error report written to {}", path.display()),
        None => println!("No errors recorded in this session."),
    }
    Ok(Control::Continue)
}

fn cmd_read_err_report(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    match session.ledger.latest_report()? {
        Some((path, records)) => {
            println!("Error report {}:", path.display());
            println!("{}", output::render_report_table(&records));
        }
        None => println!(
            "No error report found in the '{}' directory.",
            files::dir_label(session.ledger.report_dir())
        ),
    }
    Ok(Control::Continue)
}

fn cmd_clear_err_report(session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    session.ledger.clear();
    logging::truncate_log(&session.log_file)?;
    println!("Session errors cleared.");
    Ok(Control::Continue)
}

fn cmd_help(_session: &mut Session, args: &[String]) -> Result<Control, ShellError> {
    match args.first() {
        Some(name) => match COMMANDS.iter().find(|spec| spec.name == name.as_str()) {
            Some(spec) => {
                println!("{}", help::render_command_help(spec));
                Ok(Control::Continue)
            }
            None => Err(ShellError::UserInput(format!("*** No help on {}", name))),
        },
        None => {
            println!("{}", help::render_help());
            Ok(Control::Continue)
        }
    }
}

fn cmd_version(_session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    println!("JADN CLI version {}", env!("CARGO_PKG_VERSION"));
    Ok(Control::Continue)
}

fn cmd_clear(_session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    // ANSI full reset, same escape the original shell emitted.
    print!("\x1bc");
    io::stdout().flush()?;
    Ok(Control::Continue)
}

fn cmd_exit(_session: &mut Session, _args: &[String]) -> Result<Control, ShellError> {
    println!("See you next time.");
    Ok(Control::Exit)
}
