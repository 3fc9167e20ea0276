/// The result of parsing a Makefile: its rules and variables in file order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedFile {
    pub(crate) identifier: String,
    pub(crate) rules: Vec<Rule>,
    pub(crate) variables: Vec<Variable>,
}

/// A rule: a target, its prerequisites and its recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub(crate) target: String,
    pub(crate) dependencies: Vec<String>,
    pub(crate) body: Vec<String>,
    pub(crate) identifier: String,
    pub(crate) line_number: usize,
}

/// How a variable was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// `NAME := value`
    SimplyExpanded,
    /// `NAME = value`
    RecursivelyExpanded,
    /// A dot-prefixed directive such as `.PHONY: all`
    Special,
}

/// A variable assignment or special directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub(crate) name: String,
    pub(crate) assignment: String,
    pub(crate) kind: VariableKind,
    pub(crate) identifier: String,
    pub(crate) line_number: usize,
}

impl ParsedFile {
    pub(crate) fn new(identifier: &str) -> Self {
        ParsedFile {
            identifier: identifier.to_string(),
            rules: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// The identifier (usually a path) the file was read from
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// All rules, in file order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All variables and special directives, in file order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Whether the file contained neither rules nor variables
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.variables.is_empty()
    }

    /// The target names of all rules, in file order
    ///
    /// # Example
    /// ```
    /// let parsed: make_helper::ParsedFile = "all: build\nbuild:\n\tcargo build\n".parse().unwrap();
    /// assert_eq!(parsed.targets().collect::<Vec<_>>(), vec!["all", "build"]);
    /// ```
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|rule| rule.target())
    }

    /// Find the first rule declaring `target`
    pub fn find_rule_by_target(&self, target: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.target == target)
    }

    /// Find the first variable named `name`
    ///
    /// Special directives are stored without their leading dot, so `.PHONY`
    /// is found as `"PHONY"`.
    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name == name)
    }

    /// Targets declared phony by any `.PHONY` directive
    ///
    /// # Example
    /// ```
    /// let parsed: make_helper::ParsedFile = ".PHONY: all\n.PHONY: clean test\n".parse().unwrap();
    /// assert_eq!(parsed.phony_targets().collect::<Vec<_>>(), vec!["all", "clean", "test"]);
    /// ```
    pub fn phony_targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables
            .iter()
            .filter(|var| var.kind == VariableKind::Special && var.name == "PHONY")
            .flat_map(|var| var.assignment.split_whitespace())
    }
}

impl Rule {
    /// The target name
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The prerequisites, in the order they were listed
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The recipe lines, with leading tabs and surrounding whitespace removed
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Whether the rule has any recipe lines
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// The identifier of the file this rule was read from
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The 1-based line number of the rule header
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Variable {
    /// The variable name; special directives are stored without the dot
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unexpanded right-hand side
    pub fn assignment(&self) -> &str {
        &self.assignment
    }

    /// How the variable was declared
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Whether this is a dot-prefixed directive
    pub fn is_special(&self) -> bool {
        self.kind == VariableKind::Special
    }

    /// The identifier of the file this variable was read from
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The 1-based line number of the assignment or directive itself, the
    /// same convention as [`Rule::line_number`]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VariableKind::SimplyExpanded => write!(f, ":="),
            VariableKind::RecursivelyExpanded => write!(f, "="),
            VariableKind::Special => write!(f, "special"),
        }
    }
}
