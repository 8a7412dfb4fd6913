//! A minimal typed model of the emitted shell script.
//!
//! The generated script is represented as an ordered sequence of statements
//! and rendered to text in one pass. Tests can then assert on the statement
//! sequence itself without going through string matching.

/// One shell statement. Nested bodies use two-space indentation per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `# text`, one marker per line for multi-line text.
    Comment(String),
    /// An empty line.
    Blank,
    /// A raw command line, emitted verbatim.
    Cmd(String),
    /// `name=value`
    Assign { name: String, value: String },
    /// `name+=value`
    AppendAssign { name: String, value: String },
    /// `export name=value`
    Export { name: String, value: String },
    /// `if condition; then ... fi`
    If { condition: String, body: Vec<Stmt> },
    /// `readarray array <<< "$source"` followed by `for item in "${array[@]}"`.
    ForLines { array: String, source: String, item: String, body: Vec<Stmt> },
    /// `command || { ... }`
    OrElse { command: String, body: Vec<Stmt> },
    /// `continue`
    Continue,
}

impl Stmt {
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    pub fn cmd(line: impl Into<String>) -> Self {
        Self::Cmd(line.into())
    }

    pub fn assign(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Assign { name: name.into(), value: value.into() }
    }

    pub fn append(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AppendAssign { name: name.into(), value: value.into() }
    }

    pub fn export(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Export { name: name.into(), value: value.into() }
    }
}

/// Render a statement sequence to script text, ending with a newline.
pub fn render(stmts: &[Stmt]) -> String {
    let mut lines = Vec::new();
    for stmt in stmts {
        push_stmt(stmt, 0, &mut lines);
    }
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

fn push_stmt(stmt: &Stmt, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match stmt {
        Stmt::Comment(text) => {
            for line in text.split('\n') {
                lines.push(format!("{}# {}", indent, line));
            }
        }
        Stmt::Blank => lines.push(String::new()),
        Stmt::Cmd(line) => lines.push(format!("{}{}", indent, line)),
        Stmt::Assign { name, value } => lines.push(format!("{}{}={}", indent, name, value)),
        Stmt::AppendAssign { name, value } => {
            lines.push(format!("{}{}+={}", indent, name, value))
        }
        Stmt::Export { name, value } => {
            lines.push(format!("{}export {}={}", indent, name, value))
        }
        Stmt::If { condition, body } => {
            lines.push(format!("{}if {}; then", indent, condition));
            for inner in body {
                push_stmt(inner, depth + 1, lines);
            }
            lines.push(format!("{}fi", indent));
        }
        Stmt::ForLines { array, source, item, body } => {
            lines.push(format!("{}readarray {} <<< \"${}\"", indent, array, source));
            lines.push(format!("{}for {} in \"${{{}[@]}}\"", indent, item, array));
            lines.push(format!("{}do", indent));
            for inner in body {
                push_stmt(inner, depth + 1, lines);
            }
            lines.push(format!("{}done", indent));
        }
        Stmt::OrElse { command, body } => {
            lines.push(format!("{}{} || {{", indent, command));
            for inner in body {
                push_stmt(inner, depth + 1, lines);
            }
            lines.push(format!("{}}}", indent));
        }
        Stmt::Continue => lines.push(format!("{}continue", indent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_flat_statements() {
        let script = render(&[
            Stmt::comment("Automatically abort on error"),
            Stmt::cmd("set -e"),
            Stmt::Blank,
            Stmt::assign("tmpDir", "\"$(mktemp --directory)\""),
            Stmt::export("GOPATH", "$tmpDir"),
            Stmt::append("out", "$'\\n'"),
        ]);

        assert_eq!(
            script,
            "# Automatically abort on error\n\
             set -e\n\
             \n\
             tmpDir=\"$(mktemp --directory)\"\n\
             export GOPATH=$tmpDir\n\
             out+=$'\\n'\n"
        );
    }

    #[test]
    fn renders_nested_blocks_with_indentation() {
        let script = render(&[Stmt::ForLines {
            array: "pkgs".to_string(),
            source: "pkgsStr".to_string(),
            item: "entry".to_string(),
            body: vec![
                Stmt::If {
                    condition: "[[ -z \"$entry\" ]]".to_string(),
                    body: vec![Stmt::Continue],
                },
                Stmt::OrElse {
                    command: "grep -q x f".to_string(),
                    body: vec![Stmt::cmd("echo x >> f")],
                },
            ],
        }]);

        assert_eq!(
            script,
            "readarray pkgs <<< \"$pkgsStr\"\n\
             for entry in \"${pkgs[@]}\"\n\
             do\n\
             \x20\x20if [[ -z \"$entry\" ]]; then\n\
             \x20\x20\x20\x20continue\n\
             \x20\x20fi\n\
             \x20\x20grep -q x f || {\n\
             \x20\x20\x20\x20echo x >> f\n\
             \x20\x20}\n\
             done\n"
        );
    }

    #[test]
    fn multi_line_comments_get_a_marker_per_line() {
        let script = render(&[Stmt::comment("first\nsecond")]);
        assert_eq!(script, "# first\n# second\n");
    }
}
