//! Text command shell over a [`Registry`].
//!
//! Single-letter commands, one per line: `c` register batch, `l` list
//! batches, `a` vaccinate, `r` retire batch, `d` delete history, `u` list
//! inoculations, `t` get/set date, `v` update expiry, `q` quit. This layer
//! only parses, dispatches and prints; all invariants live in the core.

pub mod parser;
pub mod report;

use std::io::{self, BufRead, Write};

use crate::core::{Date, RegistryError};
use crate::registry::{BatchListing, Registry};

pub use report::Language;

/// System date at process start.
pub const START_DATE: Date = Date::new(1, 1, 2025);

/// A read-dispatch-print session. Generic over the output sink so whole
/// sessions can run against an in-memory buffer in tests.
pub struct Session<W: Write> {
    registry: Registry,
    lang: Language,
    out: W,
    fatal: bool,
}

impl<W: Write> Session<W> {
    pub fn new(lang: Language, out: W) -> Self {
        Self {
            registry: Registry::new(START_DATE),
            lang,
            out,
            fatal: false,
        }
    }

    /// True once a fatal error has been reported; the loop stops and the
    /// process should exit non-zero.
    pub fn fatal(&self) -> bool {
        self.fatal
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Processes commands until `q`, end of input, or a fatal error.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        for line in input.lines() {
            if !self.dispatch(&line?)? {
                break;
            }
        }
        self.out.flush()
    }

    /// Runs one command line. Returns false when the session should end.
    pub fn dispatch(&mut self, line: &str) -> io::Result<bool> {
        let mut tokens = parser::tokenize(line);
        if tokens.is_empty() {
            return Ok(true);
        }
        let command = tokens.remove(0);
        let args = tokens;
        match command.as_str() {
            "q" => return Ok(false),
            "c" => self.cmd_register(&args)?,
            "l" => self.cmd_list(&args)?,
            "a" => self.cmd_vaccinate(&args)?,
            "r" => self.cmd_retire(&args)?,
            "d" => self.cmd_delete(&args)?,
            "u" => self.cmd_inoculations(&args)?,
            "t" => self.cmd_date(&args)?,
            "v" => self.cmd_update_expiry(&args)?,
            // Unknown commands are ignored, like blank lines.
            _ => {}
        }
        Ok(!self.fatal)
    }

    fn report(&mut self, err: &RegistryError) -> io::Result<()> {
        writeln!(self.out, "{}", report::message(err, self.lang))?;
        if err.is_fatal() {
            self.fatal = true;
        }
        Ok(())
    }

    /// `c <code> <d-m-y> <quantity> <name>`
    fn cmd_register(&mut self, args: &[String]) -> io::Result<()> {
        let [code, date, quantity, name, ..] = args else {
            return Ok(());
        };
        // Malformed numeric fields become sentinel values that fail the
        // corresponding check, keeping the contract's error order intact.
        let expiry = parser::parse_date(date).unwrap_or(Date::new(0, 0, 0));
        let quantity = quantity.parse::<i64>().unwrap_or(0);
        match self.registry.register_batch(name, code, expiry, quantity) {
            Ok(code) => writeln!(self.out, "{code}"),
            Err(err) => self.report(&err),
        }
    }

    /// `l [name ...]`
    fn cmd_list(&mut self, args: &[String]) -> io::Result<()> {
        for listing in self.registry.list_batches(args) {
            match listing {
                BatchListing::Batch(b) => writeln!(
                    self.out,
                    "{} {} {} {} {}",
                    b.name, b.code, b.expiry, b.remaining, b.uses
                )?,
                BatchListing::UnknownVaccine(name) => {
                    self.report(&RegistryError::NoSuchVaccine(name))?;
                }
            }
        }
        Ok(())
    }

    /// `a <recipient> <vaccine>`
    fn cmd_vaccinate(&mut self, args: &[String]) -> io::Result<()> {
        let [recipient, vaccine, ..] = args else {
            return Ok(());
        };
        match self.registry.vaccinate(recipient, vaccine) {
            Ok(code) => writeln!(self.out, "{code}"),
            Err(err) => self.report(&err),
        }
    }

    /// `r <code>`
    fn cmd_retire(&mut self, args: &[String]) -> io::Result<()> {
        let [code, ..] = args else {
            return Ok(());
        };
        match self.registry.retire_batch(code) {
            Ok(count) => writeln!(self.out, "{count}"),
            Err(err) => self.report(&err),
        }
    }

    /// `d <recipient> [d-m-y [code]]`
    fn cmd_delete(&mut self, args: &[String]) -> io::Result<()> {
        let Some(recipient) = args.first() else {
            return Ok(());
        };
        let code = args.get(2).map(String::as_str);
        let date = match args.get(1) {
            None => None,
            Some(token) => match parser::parse_date(token) {
                Ok(date) => Some(date),
                Err(err) => {
                    // Unknown-code reporting still precedes the date error.
                    if let Some(code) = code {
                        if !self.registry.log().has_code(code) {
                            return self.report(&RegistryError::NoSuchBatch(code.to_string()));
                        }
                    }
                    return self.report(&err);
                }
            },
        };
        match self.registry.delete_history(recipient, date, code) {
            Ok(deleted) => writeln!(self.out, "{deleted}"),
            Err(err) => self.report(&err),
        }
    }

    /// `u [recipient]`
    fn cmd_inoculations(&mut self, args: &[String]) -> io::Result<()> {
        // Rendered eagerly so the registry borrow ends before reporting.
        let lines = self
            .registry
            .list_inoculations(args.first().map(String::as_str))
            .map(|records| {
                records
                    .map(|r| format!("{} {} {}", r.recipient, r.code, r.date))
                    .collect::<Vec<_>>()
            });
        match lines {
            Ok(lines) => {
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
                Ok(())
            }
            Err(err) => self.report(&err),
        }
    }

    /// `t [d-m-y]`, printing the (possibly just advanced) system date.
    fn cmd_date(&mut self, args: &[String]) -> io::Result<()> {
        let Some(token) = args.first() else {
            let today = self.registry.today();
            return writeln!(self.out, "{today}");
        };
        // A token that is not even date-shaped is ignored outright.
        let Ok(date) = parser::parse_date(token) else {
            return Ok(());
        };
        match self.registry.advance_date(date) {
            Ok(today) => writeln!(self.out, "{today}"),
            Err(err) => self.report(&err),
        }
    }

    /// `v <code> <d-m-y>`
    fn cmd_update_expiry(&mut self, args: &[String]) -> io::Result<()> {
        let [code, date, ..] = args else {
            return Ok(());
        };
        let result = match parser::parse_date(date) {
            Ok(date) => self.registry.update_expiry(code, date),
            // Existence is still checked first for a shapeless date token.
            Err(err) if self.registry.batches().contains(code) => Err(err),
            Err(_) => Err(RegistryError::NoSuchBatch(code.to_string())),
        };
        match result {
            Ok(remaining) => writeln!(self.out, "{remaining}"),
            Err(err) => self.report(&err),
        }
    }
}
