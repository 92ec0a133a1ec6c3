//! Indentation-driven parser for the SPD text notation.
//!
//! Every statement line is `N` leading tabs followed by either a `:directive [argument]` or free
//! text (a process label). Each indentation level is a context collecting sibling nodes; when a
//! context closes, its nodes are attached to the node that opened it (a child, an `:if` branch or
//! a `:case` body).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Node, SwitchCases};
use crate::{Error, Result};

/// A line ending with this marker continues on the next line; elsewhere it is a forced line break.
pub const CONTINUATION_MARKER: char = '@';

fn re_comment_line() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"^\s*(#.*)?$").expect("comment pattern is valid"))
}

/// Blank lines and `#` lines are skipped entirely, including for indentation tracking.
pub fn is_comment_line(line: &str) -> bool {
    re_comment_line().is_match(line)
}

fn leading_tabs(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b'\t').count()
}

/// Parses `source` into the root node list.
///
/// Returns `Ok(None)` when the source holds nothing but blank and comment lines. The first
/// structural error aborts the parse.
pub fn parse(source: &str) -> Result<Option<Node>> {
    parse_with_recovery(source, |_, _, _| false)
}

/// Like [`parse`], but offers each error raised while processing a line to `on_error` together
/// with the raw line and its 0-based line number. Returning `true` skips the line and continues.
///
/// Errors raised while closing the remaining contexts at end of input are not offered.
///
/// A panic during parsing, including one in `on_error`, comes back as
/// [`Error::WrappedUnexpected`]. The process panic hook still runs first, so a binary that wants a
/// single report installs its own hook.
pub fn parse_with_recovery<F>(source: &str, on_error: F) -> Result<Option<Node>>
where
    F: FnMut(&str, usize, &Error) -> bool,
{
    let run = catch_unwind(AssertUnwindSafe(|| {
        Parser::default().run(source, on_error)
    }));
    match run {
        Ok(result) => result,
        Err(payload) => Err(Error::WrappedUnexpected {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OptionStatus {
    #[default]
    Default,
    Else,
}

#[derive(Debug, Default)]
struct Context {
    depth: usize,
    nodes: Vec<Node>,
    option_status: OptionStatus,
    /// A `:case` label declared in this context whose body has not been attached yet.
    option_arg: Option<String>,
}

impl Context {
    fn child(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..Self::default()
        }
    }

    /// Commits a pending `:case` into the trailing switch with an empty body.
    fn commit_pending_case(&mut self) {
        if let Some(Node::Switch { cases, .. }) = self.nodes.last_mut() {
            if let Some(label) = self.option_arg.take() {
                cases.insert(label, None);
            }
        }
    }

    fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.option_status = OptionStatus::Default;
        self.option_arg = None;
    }
}

#[derive(Debug)]
struct Parser {
    /// `stack[0]` is the root context; the last entry is the current one.
    stack: Vec<Context>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            stack: vec![Context::default()],
        }
    }
}

impl Parser {
    fn run<F>(mut self, source: &str, mut on_error: F) -> Result<Option<Node>>
    where
        F: FnMut(&str, usize, &Error) -> bool,
    {
        let lines: Vec<&str> = source
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        let mut line_no = 0usize;
        while line_no < lines.len() {
            let line = lines[line_no];
            line_no += 1;
            if is_comment_line(line) {
                continue;
            }

            if let Err(err) = self.process_line(&lines, line, &mut line_no) {
                tracing::debug!(line_no = line_no - 1, error = %err, "structural error");
                if !on_error(line, line_no - 1, &err) {
                    return Err(err);
                }
            }
        }

        while self.stack.len() > 1 {
            self.close_context()?;
        }
        let mut root = self.stack.pop().unwrap_or_default();
        root.commit_pending_case();

        if root.nodes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Node::NodeList {
            children: root.nodes,
        }))
    }

    fn current(&mut self) -> &mut Context {
        // The root context is only popped once all lines are processed.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn process_line(&mut self, lines: &[&str], line: &str, line_no: &mut usize) -> Result<()> {
        let tab_num = leading_tabs(line);

        let ctx = self.current();
        if tab_num > 0 && ctx.nodes.is_empty() {
            return Err(Error::IllegalIndentation);
        }
        if tab_num > ctx.depth {
            if tab_num > ctx.depth + 1 {
                return Err(Error::IllegalIndentation);
            }
            match ctx.nodes.last() {
                Some(Node::Comment { .. }) => return Err(Error::IllegalIndentation),
                Some(Node::Switch { .. }) if ctx.option_arg.is_none() => {
                    return Err(Error::IllegalIndentation);
                }
                _ => {}
            }
            let child = ctx.child();
            tracing::trace!(depth = child.depth, "open context");
            self.stack.push(child);
        }

        while tab_num < self.current().depth {
            self.close_context()?;
        }

        let body = assemble_body(&line[tab_num..], lines, line_no);
        handle_body(self.current(), &body)
    }

    fn close_context(&mut self) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(Error::IllegalIndentation);
        }
        let Some(mut ctx) = self.stack.pop() else {
            return Err(Error::IllegalIndentation);
        };
        tracing::trace!(depth = ctx.depth, nodes = ctx.nodes.len(), "close context");
        ctx.commit_pending_case();

        let payload = match ctx.nodes.len() {
            0 => return Ok(()),
            1 => ctx.nodes.pop().unwrap_or_else(|| Node::list([])),
            _ => Node::NodeList {
                children: ctx.nodes,
            },
        };

        let Context {
            nodes,
            option_status,
            option_arg,
            ..
        } = self.current();
        let Some(target) = nodes.last_mut() else {
            return Err(Error::InternalInconsistency {
                message: "a nested context has no node to attach to".to_string(),
            });
        };

        match target {
            Node::Process { child, .. } | Node::Call { child, .. } | Node::Loop { child, .. } => {
                *child = Some(Box::new(payload));
            }
            Node::Switch { cases, .. } => {
                let Some(label) = option_arg.take() else {
                    return Err(Error::InternalInconsistency {
                        message: "no pending case for a switch body".to_string(),
                    });
                };
                cases.insert(label, Some(payload));
            }
            Node::If {
                true_branch,
                false_branch,
                ..
            } => match option_status {
                OptionStatus::Default => *true_branch = Some(Box::new(payload)),
                OptionStatus::Else => {
                    if false_branch.is_some() {
                        return Err(Error::MisplacedElse);
                    }
                    *false_branch = Some(Box::new(payload));
                }
            },
            other @ (Node::Terminal { .. } | Node::Comment { .. } | Node::NodeList { .. }) => {
                return Err(Error::InternalInconsistency {
                    message: format!("a {} node cannot hold children", other.kind()),
                });
            }
        }

        *option_status = OptionStatus::Default;
        *option_arg = None;
        Ok(())
    }
}

/// Joins continuation lines onto `first` and turns remaining markers into line breaks.
///
/// `line_no` is advanced past every consumed continuation line.
fn assemble_body(first: &str, lines: &[&str], line_no: &mut usize) -> String {
    let Some(head) = first.strip_suffix(CONTINUATION_MARKER) else {
        return first.replace(CONTINUATION_MARKER, "\n");
    };

    let mut body = head.to_string();
    while *line_no < lines.len() {
        let next = lines[*line_no];
        *line_no += 1;
        if is_comment_line(next) {
            continue;
        }

        let next = &next[leading_tabs(next)..];
        body.push('\n');
        match next.strip_suffix(CONTINUATION_MARKER) {
            Some(rest) => body.push_str(rest),
            None => {
                body.push_str(next);
                break;
            }
        }
    }
    body.replace(CONTINUATION_MARKER, "\n")
}

/// Splits `call foo bar` into `("call", Some("foo bar"))`. The argument is `None` only when no
/// space or tab follows the command word.
fn split_directive(rest: &str) -> (&str, Option<&str>) {
    match rest.find([' ', '\t']) {
        Some(idx) => (&rest[..idx], Some(rest[idx..].trim())),
        None => (rest, None),
    }
}

fn required(arg: Option<&str>) -> Result<&str> {
    match arg {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => Err(Error::MissingRequiredArgument),
    }
}

fn handle_body(ctx: &mut Context, body: &str) -> Result<()> {
    ctx.commit_pending_case();

    let Some(directive) = body.strip_prefix(':') else {
        ctx.push(Node::process(body));
        return Ok(());
    };

    let (command, arg) = split_directive(directive);
    tracing::trace!(command, ?arg, "directive");
    match command {
        "call" => ctx.push(Node::call(required(arg)?)),
        "terminal" => ctx.push(Node::terminal(required(arg)?)),
        "comment" => ctx.push(Node::comment(required(arg)?)),
        "while" => ctx.push(Node::while_loop(required(arg)?)),
        "dowhile" => ctx.push(Node::do_while_loop(required(arg)?)),
        "if" => ctx.push(Node::if_else(required(arg)?, None, None)),
        "switch" => ctx.push(Node::Switch {
            text: required(arg)?.to_string(),
            cases: SwitchCases::new(),
        }),
        "else" => {
            let Some(Node::If { false_branch, .. }) = ctx.nodes.last() else {
                return Err(Error::MisplacedElse);
            };
            if false_branch.is_some() || ctx.option_status == OptionStatus::Else {
                return Err(Error::MisplacedElse);
            }
            if arg.is_some() {
                return Err(Error::UnexpectedArgument);
            }
            ctx.option_status = OptionStatus::Else;
            ctx.option_arg = None;
        }
        "case" => {
            let Some(Node::Switch { cases, .. }) = ctx.nodes.last() else {
                return Err(Error::MisplacedCase);
            };
            let label = required(arg)?;
            if cases.contains_key(label) {
                return Err(Error::DuplicateCase {
                    label: label.to_string(),
                });
            }
            ctx.option_status = OptionStatus::Default;
            ctx.option_arg = Some(label.to_string());
        }
        other => {
            return Err(Error::UnknownDirective {
                command: other.to_string(),
            });
        }
    }
    Ok(())
}
