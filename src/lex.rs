/// The shape of a single Makefile line.
///
/// Produced by [`classify`], which tries the shapes in a fixed order: comments,
/// dot-prefixed directives, rule headers, `:=` assignments and finally `=`
/// assignments. The first shape that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind<'a> {
    /// A line starting with `#`
    Comment,
    /// `.NAME: rest`
    SpecialDirective {
        /// Directive name, without the leading dot
        name: &'a str,
        /// Everything after the colon, trimmed
        rest: &'a str,
    },
    /// `target: deps`
    RuleHeader {
        /// Target name
        target: &'a str,
        /// Everything after the colon, untrimmed
        prerequisites: &'a str,
    },
    /// `NAME := value`
    SimpleVariable {
        /// Variable name
        name: &'a str,
        /// Right-hand side, trimmed
        value: &'a str,
    },
    /// `NAME = value`
    ExpandedVariable {
        /// Variable name
        name: &'a str,
        /// Right-hand side, trimmed
        value: &'a str,
    },
    /// Anything else, including dot lines that are not directives
    Unrecognized,
}

fn is_directive_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_target_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-'
}

fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Split `line` after the longest non-empty prefix whose chars satisfy `predicate`.
fn read_while<F>(line: &str, predicate: F) -> Option<(&str, &str)>
where
    F: Fn(char) -> bool,
{
    let end = line.find(|c: char| !predicate(c)).unwrap_or(line.len());
    if end == 0 {
        None
    } else {
        Some(line.split_at(end))
    }
}

fn directive(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = read_while(line.strip_prefix('.')?, is_directive_char)?;
    let rest = rest.strip_prefix(':')?;
    Some((name.trim(), rest.trim()))
}

fn rule_header(line: &str) -> Option<(&str, &str)> {
    let (target, rest) = read_while(line, is_target_char)?;
    Some((target, rest.strip_prefix(':')?))
}

fn assignment<'a>(line: &'a str, operator: &str) -> Option<(&'a str, &'a str)> {
    let (name, rest) = read_while(line, is_variable_char)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    Some((name, rest.strip_prefix(operator)?.trim()))
}

/// Classify a single line.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with('#') {
        return LineKind::Comment;
    }

    if line.starts_with('.') {
        return match directive(line) {
            Some((name, rest)) => LineKind::SpecialDirective { name, rest },
            None => LineKind::Unrecognized,
        };
    }

    if let Some((target, prerequisites)) = rule_header(line) {
        return LineKind::RuleHeader {
            target,
            prerequisites,
        };
    }

    // `:=` before `=`
    if let Some((name, value)) = assignment(line, ":=") {
        return LineKind::SimpleVariable { name, value };
    }

    if let Some((name, value)) = assignment(line, "=") {
        return LineKind::ExpandedVariable { name, value };
    }

    LineKind::Unrecognized
}

/// If `line` is a recipe line (one or more leading tabs), return its command text.
pub fn recipe(line: &str) -> Option<&str> {
    if line.starts_with('\t') {
        Some(line.trim_start_matches('\t').trim())
    } else {
        None
    }
}

/// Split the text after a rule's colon into prerequisite names.
///
/// Splits on single spaces and drops the empty tokens that runs of spaces leave
/// behind. Order and duplicates are preserved.
pub fn prerequisites(text: &str) -> Vec<String> {
    text.split(' ')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
