#![allow(clippy::tabs_in_doc_comments)] // Makefile uses tabs
#![deny(missing_docs)]

//! A line-oriented parser for a subset of the Makefile grammar
//!
//! Recognizes rule headers with their recipes, `:=` and `=` assignments and
//! dot-prefixed directives such as `.PHONY`. Everything else is skipped.
//!
//! Example:
//!
//! ```rust
//! let contents = r#"PYTHON = python3
//!
//! .PHONY: all
//!
//! all: build
//!
//! build:
//! 	$(PYTHON) setup.py build
//! "#;
//! let makefile: make_helper::ParsedFile = contents.parse().unwrap();
//!
//! assert_eq!(makefile.rules().len(), 2);
//! assert_eq!(makefile.variables().len(), 2);
//! assert_eq!(makefile.rules()[1].body(), &["$(PYTHON) setup.py build"]);
//! ```

mod ast;
mod lex;
mod parse;
mod scan;

pub use ast::{ParsedFile, Rule, Variable, VariableKind};
pub use lex::{classify, LineKind};
pub use parse::{parse, parse_reader, Error};
pub use scan::{Line, LineSource};
