use std::fmt;

use crate::printer::utils::string_width;

/// A single layout directive.
///
/// Documents form a tree rooted in an outer [`Group`]; the printer walks
/// the tree and decides, group by group, whether contents render on one
/// line or break across several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<'a> {
    /// Literal characters; width is the string's display width.
    Text(&'a str),
    /// A conditional line break; see [`Breakable`].
    Breakable(Breakable<'a>),
    /// Marks every enclosing group up to the root as broken. Carries no
    /// output of its own; its work happens at construction time.
    BreakParent,
    /// A sequence whose contents render flat if they fit on the remaining
    /// line, broken otherwise.
    Group(Group<'a>),
    /// Renders one branch when the enclosing group is broken, the other
    /// when it is flat.
    IfBreak(IfBreak<'a>),
    /// Raises the prevailing indentation by one step for the contents.
    Indent(Vec<Document<'a>>),
    /// Adds a signed column delta to the prevailing indentation.
    Align(Align<'a>),
    /// Defers contents until just before the next line break.
    LineSuffix(LineSuffix<'a>),
    /// Strips trailing spaces and tabs from the output and pulls the
    /// column counter back by the amount removed.
    Trim,
    /// Emitted verbatim without advancing the column counter; an escape
    /// hatch for caller sentinels and control sequences the engine must
    /// not measure.
    Marker(&'a str),
}

/// A conditional line break.
///
/// Flat, it renders as `separator`; broken, it renders as a newline
/// followed by the prevailing indentation, or by nothing when `indent` is
/// false (heredoc bodies and continuation lines that must start at column
/// zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakable<'a> {
    /// Literal emitted when the enclosing group renders flat.
    pub separator: &'a str,
    /// Display width of `separator`.
    pub width: usize,
    /// An unavoidable break: a group that measured flat must remeasure
    /// broken once this is reached.
    pub force: bool,
    /// Whether the next line starts at the prevailing indentation.
    pub indent: bool,
}

impl Breakable<'static> {
    /// `" "` when flat, an indented newline when broken.
    pub const SPACE: Self = Self { separator: " ", width: 1, force: false, indent: true };
    /// Nothing when flat, an indented newline when broken.
    pub const EMPTY: Self = Self { separator: "", width: 0, force: false, indent: true };
    /// An unavoidable indented newline.
    pub const FORCE: Self = Self { separator: " ", width: 1, force: true, indent: true };
    /// An unavoidable newline that does not indent the next line.
    pub const RETURN: Self = Self { separator: " ", width: 1, force: true, indent: false };
}

impl<'a> Breakable<'a> {
    /// A non-forced, indenting breakable whose flat separator is
    /// `separator`, measured in display columns.
    pub fn new(separator: &'a str) -> Self {
        Self { separator, width: string_width(separator), force: false, indent: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub contents: Vec<Document<'a>>,
    /// Monotonic within a format pass: set during construction when a
    /// break-parent reaches this group, never cleared by the printer.
    pub should_break: bool,
}

impl<'a> Group<'a> {
    pub fn new(contents: Vec<Document<'a>>) -> Self {
        Self { contents, should_break: false }
    }

    pub fn with_break(mut self, yes: bool) -> Self {
        self.should_break = yes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfBreak<'a> {
    pub break_contents: Vec<Document<'a>>,
    pub flat_contents: Vec<Document<'a>>,
}

impl<'a> IfBreak<'a> {
    pub fn new(break_contents: Vec<Document<'a>>, flat_contents: Vec<Document<'a>>) -> Self {
        Self { break_contents, flat_contents }
    }

    /// An if-break whose flat branch is empty.
    pub fn then(break_contents: Vec<Document<'a>>) -> Self {
        Self { break_contents, flat_contents: vec![] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Align<'a> {
    /// Signed column delta; negative values outdent keywords such as
    /// `rescue` relative to the prevailing indentation.
    pub delta: isize,
    pub contents: Vec<Document<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSuffix<'a> {
    /// Orders multiple deferrals flushed at the same line break: lower
    /// priorities render first, higher priorities last before the newline.
    pub priority: u8,
    pub contents: Vec<Document<'a>>,
}

/// Separators accepted by [`Document::join`].
#[derive(Debug, Clone, Copy)]
pub enum Separator {
    Space,
    BreakableSpace,
    BreakableEmpty,
    ForcedBreakable,
    /// `","` followed by a breakable space.
    CommaBreakable,
}

impl<'a> Document<'a> {
    #[inline]
    pub fn empty() -> Document<'a> {
        Document::Text("")
    }

    #[inline]
    pub fn space() -> Document<'a> {
        Document::Text(" ")
    }

    /// Whether any [`Breakable`] is reachable in this subtree.
    pub fn can_break(&self) -> bool {
        match self {
            Document::Breakable(_) => true,
            Document::Text(_) | Document::BreakParent | Document::Trim | Document::Marker(_) => false,
            Document::Group(Group { contents, .. })
            | Document::Indent(contents)
            | Document::Align(Align { contents, .. })
            | Document::LineSuffix(LineSuffix { contents, .. }) => contents.iter().any(Document::can_break),
            Document::IfBreak(IfBreak { break_contents, flat_contents }) => {
                break_contents.iter().any(Document::can_break) || flat_contents.iter().any(Document::can_break)
            }
        }
    }

    /// Final column after a flat walk of this document, with the count
    /// restarting at zero on every breakable.
    ///
    /// Callers use this to align trailing content to the end of what has
    /// already been laid down, e.g. lining arguments up with the end of a
    /// message name.
    pub fn last_position(&self) -> usize {
        let mut position = 0;
        let mut stack = vec![self];

        while let Some(document) = stack.pop() {
            match document {
                Document::Text(text) => {
                    position = if text.contains('\n') { string_width(text) } else { position + string_width(text) };
                }
                Document::Breakable(_) => position = 0,
                Document::Group(Group { contents, .. })
                | Document::Indent(contents)
                | Document::Align(Align { contents, .. }) => stack.extend(contents.iter().rev()),
                Document::IfBreak(IfBreak { flat_contents, .. }) => stack.extend(flat_contents.iter().rev()),
                Document::BreakParent | Document::Trim | Document::Marker(_) | Document::LineSuffix(_) => {}
            }
        }

        position
    }

    /// Replaces every breakable in the subtree with its flat separator, or
    /// with `replacement` when the break is forced, and clears every
    /// group's break flag so the subtree renders on a single line.
    pub fn remove_breaks(&mut self, replacement: &'a str) {
        match self {
            Document::Breakable(breakable) => {
                let separator = if breakable.force { replacement } else { breakable.separator };
                *self = Document::Text(separator);
            }
            Document::Group(group) => {
                group.should_break = false;
                for document in &mut group.contents {
                    document.remove_breaks(replacement);
                }
            }
            Document::Indent(contents)
            | Document::Align(Align { contents, .. })
            | Document::LineSuffix(LineSuffix { contents, .. }) => {
                for document in contents {
                    document.remove_breaks(replacement);
                }
            }
            Document::IfBreak(IfBreak { break_contents, flat_contents }) => {
                for document in break_contents.iter_mut().chain(flat_contents.iter_mut()) {
                    document.remove_breaks(replacement);
                }
            }
            Document::Text(_) | Document::BreakParent | Document::Trim | Document::Marker(_) => {}
        }
    }

    /// Interleaves `separator` between `documents`.
    pub fn join(documents: Vec<Document<'a>>, separator: Separator) -> Vec<Document<'a>> {
        let mut parts = Vec::with_capacity(documents.len() * 2);
        for (i, document) in documents.into_iter().enumerate() {
            if i != 0 {
                match separator {
                    Separator::Space => parts.push(Document::space()),
                    Separator::BreakableSpace => parts.push(Document::Breakable(Breakable::SPACE)),
                    Separator::BreakableEmpty => parts.push(Document::Breakable(Breakable::EMPTY)),
                    Separator::ForcedBreakable => parts.push(Document::Breakable(Breakable::FORCE)),
                    Separator::CommaBreakable => {
                        parts.push(Document::Text(","));
                        parts.push(Document::Breakable(Breakable::SPACE));
                    }
                }
            }

            parts.push(document);
        }
        parts
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Text(text) => write!(f, "{text:?}"),
            Document::Breakable(breakable) => {
                let Breakable { separator, width, force, indent } = *breakable;
                if *breakable == Breakable::SPACE {
                    write!(f, "breakable_space")
                } else if *breakable == Breakable::EMPTY {
                    write!(f, "breakable_empty")
                } else if *breakable == Breakable::FORCE {
                    write!(f, "breakable_force")
                } else if *breakable == Breakable::RETURN {
                    write!(f, "breakable_return")
                } else {
                    write!(f, "breakable({separator:?}, {width}, force: {force}, indent: {indent})")
                }
            }
            Document::BreakParent => write!(f, "break_parent"),
            Document::Group(Group { contents, should_break }) => {
                if *should_break {
                    write!(f, "group({}, break: true)", List(contents))
                } else {
                    write!(f, "group({})", List(contents))
                }
            }
            Document::IfBreak(IfBreak { break_contents, flat_contents }) => {
                write!(f, "if_break({}, {})", List(break_contents), List(flat_contents))
            }
            Document::Indent(contents) => write!(f, "indent({})", List(contents)),
            Document::Align(Align { delta, contents }) => write!(f, "align({delta}, {})", List(contents)),
            Document::LineSuffix(LineSuffix { priority, contents }) => {
                write!(f, "line_suffix({priority}, {})", List(contents))
            }
            Document::Trim => write!(f, "trim"),
            Document::Marker(text) => write!(f, "marker({text:?})"),
        }
    }
}

struct List<'a, 'b>(&'b [Document<'a>]);

impl fmt::Display for List<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.0 {
            return write!(f, "{single}");
        }

        write!(f, "[")?;
        for (i, document) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{document}")?;
        }
        write!(f, "]")
    }
}
