#![forbid(unsafe_code)]

//! Human-readable output with optional color

use crate::engine::{CalculationResult, FileReport};
use crate::presets::Preset;
use crate::resolver::{ResolvedConfig, ScopeEntry};
use crate::scope::FileStatus;
use crate::types::Severity;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Writes resolved configs, file listings and presets for a terminal
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Writes a resolved configuration, section by section
    pub fn write_config(
        &self,
        out: &mut dyn WriteColor,
        config: &ResolvedConfig,
    ) -> io::Result<()> {
        heading(out, &format!("Rules ({} configured)", config.rules.len()))?;
        if config.rules.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for (name, entry) in &config.rules {
            write!(out, "  {} ", name)?;
            write_severity(out, entry.severity)?;
            if !entry.options.is_empty() {
                let options: Vec<String> = entry.options.iter().map(|v| v.to_string()).collect();
                write!(out, " {}", options.join(", "))?;
            }
            writeln!(out)?;
        }

        let globals = &config.language_options.globals;
        writeln!(out)?;
        heading(out, &format!("Globals ({})", globals.len()))?;
        for (identifier, writable) in globals {
            let access = if *writable { "writable" } else { "readonly" };
            writeln!(out, "  {} ({})", identifier, access)?;
        }

        let parser_options = &config.language_options.parser_options;
        if !parser_options.is_empty() {
            writeln!(out)?;
            heading(out, "Parser options")?;
            for (key, value) in parser_options {
                writeln!(out, "  {} = {}", key, value)?;
            }
        }

        writeln!(out)?;
        heading(out, "Scopes")?;
        for scope in &config.scopes {
            match scope {
                ScopeEntry::Global { fragment } => {
                    writeln!(out, "  #{} (all files)", fragment)?;
                }
                ScopeEntry::Pattern { pattern, fragment } => {
                    writeln!(out, "  #{} {}", fragment, pattern)?;
                }
            }
        }

        if !config.ignores.is_empty() {
            writeln!(out)?;
            heading(out, "Ignores")?;
            for pattern in &config.ignores {
                writeln!(out, "  {}", pattern)?;
            }
        }

        Ok(())
    }

    /// Writes one line per file; with `show_status` every file is listed
    /// with its status, otherwise only configured files are
    pub fn write_files(
        &self,
        out: &mut dyn WriteColor,
        result: &CalculationResult,
        show_status: bool,
    ) -> io::Result<()> {
        for report in &result.reports {
            if show_status {
                write_status(out, report.status)?;
                writeln!(out, " {}", report.relative)?;
            } else if report.status == FileStatus::Configured {
                write_file_line(out, report)?;
            }
        }

        if show_status {
            writeln!(out)?;
            writeln!(
                out,
                "{} configured, {} ignored, {} unconfigured",
                result.configured, result.ignored, result.unconfigured
            )?;
        }
        Ok(())
    }

    /// Writes the available presets
    pub fn write_presets<'a, I>(&self, out: &mut dyn WriteColor, presets: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Preset>,
    {
        for preset in presets {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", preset.name)?;
            out.reset()?;
            writeln!(out, " ({})", preset.source.as_str())?;
            if !preset.description.is_empty() {
                writeln!(out, "  {}", preset.description)?;
            }
            let rules: usize = preset.fragments.iter().map(|f| f.rules.len()).sum();
            let globals: usize = preset
                .fragments
                .iter()
                .map(|f| f.language_options.globals.len())
                .sum();
            writeln!(
                out,
                "  {} fragment(s), {} rule(s), {} global(s)",
                preset.fragments.len(),
                rules,
                globals
            )?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn heading(out: &mut dyn WriteColor, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}:", text)?;
    out.reset()
}

fn write_severity(out: &mut dyn WriteColor, severity: Severity) -> io::Result<()> {
    let color = match severity {
        Severity::Off => Color::White,
        Severity::Warn => Color::Yellow,
        Severity::Error => Color::Red,
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{}", severity)?;
    out.reset()
}

fn write_status(out: &mut dyn WriteColor, status: FileStatus) -> io::Result<()> {
    let color = match status {
        FileStatus::Configured => Color::Green,
        FileStatus::Ignored => Color::Yellow,
        FileStatus::Unconfigured => Color::White,
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{:<12}", status.as_str())?;
    out.reset()
}

fn write_file_line(out: &mut dyn WriteColor, report: &FileReport) -> io::Result<()> {
    match &report.config {
        Some(config) => writeln!(
            out,
            "{} ({} rules enabled)",
            report.relative,
            config.enabled_rules().count()
        ),
        None => writeln!(out, "{}", report.relative),
    }
}
