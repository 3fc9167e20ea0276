use crate::ast::{ParsedFile, Rule, Variable, VariableKind};
use crate::lex::{classify, prerequisites, recipe, LineKind};
use crate::scan::{Line, LineSource};
use std::io::BufRead;
use std::iter::Peekable;
use std::str::FromStr;

#[derive(Debug)]
/// An error that can occur when reading a makefile
pub enum Error {
    /// The input could not be opened
    Open {
        /// The identifier that was requested
        identifier: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Reading from an opened input failed
    Read {
        /// The identifier being read
        identifier: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl Error {
    /// The identifier of the input that failed
    pub fn identifier(&self) -> &str {
        match self {
            Error::Open { identifier, .. } | Error::Read { identifier, .. } => identifier,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            Error::Open { identifier, source } => {
                write!(f, "Error opening the provided filepath '{}': {}", identifier, source)
            }
            Error::Read { identifier, source } => {
                write!(f, "Error reading '{}': {}", identifier, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } | Error::Read { source, .. } => Some(source),
        }
    }
}

/// Parse the makefile at `identifier`.
///
/// Lines that are not comments, directives, rule headers or simple
/// assignments are skipped. The only failures are I/O failures.
pub fn parse(identifier: &str) -> Result<ParsedFile, Error> {
    let source = LineSource::open(identifier)?;
    Recognizer::new(identifier, source).parse()
}

/// Parse a makefile from an already open reader.
///
/// # Example
/// ```
/// use make_helper::{parse_reader, VariableKind};
///
/// let parsed = parse_reader("Makefile", "CC := gcc\n".as_bytes()).unwrap();
/// assert_eq!(parsed.variables()[0].kind(), VariableKind::SimplyExpanded);
/// ```
pub fn parse_reader<R: BufRead>(identifier: &str, reader: R) -> Result<ParsedFile, Error> {
    Recognizer::new(identifier, LineSource::new(identifier, reader)).parse()
}

impl FromStr for ParsedFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_reader("<string>", s.as_bytes())
    }
}

struct Recognizer<I: Iterator<Item = Result<Line, Error>>> {
    /// Lines not yet consumed.
    lines: Peekable<I>,
    /// The records collected so far.
    parsed: ParsedFile,
}

impl<I: Iterator<Item = Result<Line, Error>>> Recognizer<I> {
    fn new(identifier: &str, lines: I) -> Self {
        Recognizer {
            lines: lines.peekable(),
            parsed: ParsedFile::new(identifier),
        }
    }

    /// Consume the recipe lines directly following a rule header. The first
    /// line that is not a recipe line is left in place.
    fn parse_body(&mut self) -> Result<Vec<String>, Error> {
        let mut body = Vec::new();
        while let Some(line) = self
            .lines
            .next_if(|line| matches!(line, Ok(line) if recipe(&line.text).is_some()))
        {
            let line = line?;
            if let Some(command) = recipe(&line.text) {
                body.push(command.to_string());
            }
        }
        Ok(body)
    }

    fn variable(&self, line: &Line, name: &str, assignment: &str, kind: VariableKind) -> Variable {
        Variable {
            name: name.to_string(),
            assignment: assignment.to_string(),
            kind,
            identifier: self.parsed.identifier.clone(),
            line_number: line.number,
        }
    }

    fn parse_line(&mut self, line: Line) -> Result<(), Error> {
        let kind = classify(&line.text);
        log::trace!("{}:{}: {:?}", self.parsed.identifier, line.number, kind);

        match kind {
            LineKind::Comment | LineKind::Unrecognized => {}
            LineKind::SpecialDirective { name, rest } => {
                let var = self.variable(&line, name, rest, VariableKind::Special);
                self.parsed.variables.push(var);
            }
            LineKind::SimpleVariable { name, value } => {
                let var = self.variable(&line, name, value, VariableKind::SimplyExpanded);
                self.parsed.variables.push(var);
            }
            LineKind::ExpandedVariable { name, value } => {
                let var = self.variable(&line, name, value, VariableKind::RecursivelyExpanded);
                self.parsed.variables.push(var);
            }
            LineKind::RuleHeader {
                target,
                prerequisites: deps,
            } => {
                let body = self.parse_body()?;
                log::debug!(
                    "rule {} at line {} with {} recipe line(s)",
                    target,
                    line.number,
                    body.len()
                );
                self.parsed.rules.push(Rule {
                    target: target.to_string(),
                    dependencies: prerequisites(deps),
                    body,
                    identifier: self.parsed.identifier.clone(),
                    line_number: line.number,
                });
            }
        }
        Ok(())
    }

    fn parse(mut self) -> Result<ParsedFile, Error> {
        while let Some(line) = self.lines.next() {
            self.parse_line(line?)?;
        }
        log::debug!(
            "parsed {}: {} rule(s), {} variable(s)",
            self.parsed.identifier,
            self.parsed.rules.len(),
            self.parsed.variables.len()
        );
        Ok(self.parsed)
    }
}
