use crate::document::Align;
use crate::document::Breakable;
use crate::document::Document;
use crate::document::Group;
use crate::document::IfBreak;
use crate::document::LineSuffix;
use crate::printer::command::Command;
use crate::printer::command::Indentation;
use crate::printer::command::Mode;
use crate::printer::utils::blank_tail_width;
use crate::printer::utils::string_width;
use crate::settings::FormatSettings;

pub mod command;
pub mod utils;

/// Linearizes a [`Document`] tree into its rendered string.
///
/// Emission runs over an explicit command stack rather than recursion: a
/// command is an `(indentation, mode, document)` triple, and the stack is
/// seeded with the root document in break mode so that top-level forced
/// newlines never need a fit check.
pub struct Printer<'a> {
    settings: FormatSettings,
    out: String,
    position: usize,
    commands: Vec<Command<'a>>,
    line_suffixes: Vec<LineSuffixEntry<'a>>,
}

/// A deferred line suffix, remembered with the indentation and mode that
/// will prevail when it is flushed.
struct LineSuffixEntry<'a> {
    priority: u8,
    indentation: Indentation,
    mode: Mode,
    contents: Vec<Document<'a>>,
}

impl<'a> Printer<'a> {
    /// The output is usually about the size of the text the document was
    /// built from; callers that know it pass a capacity hint to pre-size
    /// the buffer.
    pub fn new(document: Document<'a>, capacity_hint: usize, settings: FormatSettings) -> Self {
        Self {
            settings,
            out: String::with_capacity(capacity_hint),
            position: 0,
            commands: vec![Command::new(Indentation::root(), Mode::Break, document)],
            line_suffixes: vec![],
        }
    }

    pub fn build(mut self) -> String {
        self.print_document();
        self.out
    }

    fn print_document(&mut self) {
        let mut should_remeasure = false;
        while let Some(Command { indentation, mode, document }) = self.commands.pop() {
            match document {
                Document::Text(text) => self.handle_text(text),
                Document::Breakable(breakable) => {
                    should_remeasure = self.handle_breakable(breakable, indentation, mode, should_remeasure);
                }
                Document::Group(_) => {
                    should_remeasure = self.handle_group(indentation, mode, document, should_remeasure);
                }
                Document::IfBreak(if_break) => self.handle_if_break(if_break, indentation, mode),
                Document::Indent(contents) => self.handle_indent(indentation, mode, contents),
                Document::Align(align) => self.handle_align(indentation, mode, align),
                Document::LineSuffix(line_suffix) => self.handle_line_suffix(indentation, mode, line_suffix),
                Document::Trim => self.handle_trim(),
                Document::Marker(text) => self.out.push_str(text),
                Document::BreakParent => { /* construction-time only */ }
            }

            if self.commands.is_empty() && !self.line_suffixes.is_empty() {
                // Deferred content left at the end of the stream, e.g. a
                // trailing comment on the last line.
                self.flush_line_suffixes();
            }
        }
    }

    fn remaining_width(&self) -> isize {
        (self.settings.print_width as isize) - (self.position as isize)
    }

    fn handle_text(&mut self, text: &str) {
        self.out.push_str(text);
        self.position =
            if text.contains('\n') { string_width(text) } else { self.position + string_width(text) };
    }

    fn handle_group(
        &mut self,
        indentation: Indentation,
        mode: Mode,
        document: Document<'a>,
        should_remeasure: bool,
    ) -> bool {
        let Document::Group(group) = document else {
            unreachable!();
        };

        if mode.is_flat() && !should_remeasure {
            let mode = if group.should_break { Mode::Break } else { Mode::Flat };
            self.commands.extend(group.contents.into_iter().rev().map(|doc| Command::new(indentation, mode, doc)));

            return should_remeasure;
        }

        if group.should_break {
            self.commands
                .extend(group.contents.into_iter().rev().map(|doc| Command::new(indentation, Mode::Break, doc)));

            return false;
        }

        let remaining_width = self.remaining_width();
        let command = Command::new(indentation, Mode::Flat, Document::Group(group));
        if self.fits(&command, remaining_width) {
            self.commands.push(command);
        } else {
            let Document::Group(group) = command.document else {
                unreachable!();
            };

            self.commands
                .extend(group.contents.into_iter().rev().map(|doc| Command::new(indentation, Mode::Break, doc)));
        }

        false
    }

    fn handle_breakable(
        &mut self,
        breakable: Breakable<'a>,
        indentation: Indentation,
        mode: Mode,
        mut should_remeasure: bool,
    ) -> bool {
        if mode.is_flat() {
            if !breakable.force {
                self.out.push_str(breakable.separator);
                self.position += breakable.width;

                return should_remeasure;
            }

            // A forced break inside a group that already passed its fit
            // check: the next group decision must measure again.
            should_remeasure = true;
        }

        if !self.line_suffixes.is_empty() {
            // Re-queue the break so the deferred suffixes land before it.
            self.commands.push(Command::new(indentation, mode, Document::Breakable(breakable)));
            self.flush_line_suffixes();

            return should_remeasure;
        }

        if !breakable.indent {
            self.out.push('\n');
            self.position = 0;

            return should_remeasure;
        }

        self.out.push('\n');
        self.position = self.write_indentation(indentation);

        should_remeasure
    }

    fn handle_if_break(&mut self, if_break: IfBreak<'a>, indentation: Indentation, mode: Mode) {
        let IfBreak { break_contents, flat_contents } = if_break;
        let contents = if mode.is_break() { break_contents } else { flat_contents };

        self.commands.extend(contents.into_iter().rev().map(|doc| Command::new(indentation, mode, doc)));
    }

    fn handle_indent(&mut self, indentation: Indentation, mode: Mode, contents: Vec<Document<'a>>) {
        let indentation = indentation.increased_by(self.settings.indent_width);

        self.commands.extend(contents.into_iter().rev().map(|doc| Command::new(indentation, mode, doc)));
    }

    fn handle_align(&mut self, indentation: Indentation, mode: Mode, align: Align<'a>) {
        let indentation = indentation.offset_by(align.delta);

        self.commands.extend(align.contents.into_iter().rev().map(|doc| Command::new(indentation, mode, doc)));
    }

    fn handle_line_suffix(&mut self, indentation: Indentation, mode: Mode, line_suffix: LineSuffix<'a>) {
        let LineSuffix { priority, contents } = line_suffix;
        self.line_suffixes.push(LineSuffixEntry { priority, indentation, mode, contents });
    }

    fn handle_trim(&mut self) {
        let trimmed = self.trim_trailing_blanks();
        self.position = self.position.saturating_sub(trimmed);
    }

    fn write_indentation(&mut self, indentation: Indentation) -> usize {
        let columns = indentation.columns();
        self.out.push_str(&" ".repeat(columns));
        columns
    }

    fn trim_trailing_blanks(&mut self) -> usize {
        let stripped_length = self.out.trim_end_matches([' ', '\t']).len();
        let trimmed = self.out.len() - stripped_length;
        self.out.truncate(stripped_length);
        trimmed
    }

    /// Moves the deferred suffixes onto the command stack so they are
    /// emitted next, lowest priority first, ties in insertion order.
    fn flush_line_suffixes(&mut self) {
        // Stable sort; draining in descending-priority order makes the
        // commands pop back off in ascending order.
        self.line_suffixes.sort_by_key(|entry| entry.priority);
        for entry in self.line_suffixes.drain(..).rev() {
            let LineSuffixEntry { indentation, mode, contents, .. } = entry;
            self.commands.extend(contents.into_iter().rev().map(|doc| Command::new(indentation, mode, doc)));
        }
    }

    /// Whether `next` followed by the rest of the command stack fits in
    /// `width` columns before the current line ends.
    ///
    /// Simulates the emission loop in flat mode: any line break reached in
    /// break mode, or any forced break, ends the line and therefore means
    /// everything before it fit.
    fn fits(&self, next: &Command<'a>, width: isize) -> bool {
        let mut remaining_width = width;
        // Blank run at the end of the simulated line, so a trim marker can
        // hand those columns back.
        let mut blank_tail = 0usize;
        let mut stack: Vec<(Mode, &Document<'a>)> = vec![(next.mode, &next.document)];
        let mut rest_commands = self.commands.iter().rev();

        loop {
            let (mode, document) = match stack.pop() {
                Some(top) => top,
                None => match rest_commands.next() {
                    Some(command) => (command.mode, &command.document),
                    None => return true,
                },
            };

            match document {
                Document::Text(text) => {
                    remaining_width -= string_width(text) as isize;
                    blank_tail = blank_tail_width(blank_tail, text);
                }
                Document::Breakable(breakable) => {
                    if mode.is_break() || breakable.force {
                        return true;
                    }

                    remaining_width -= breakable.width as isize;
                    blank_tail = blank_tail_width(blank_tail, breakable.separator);
                }
                Document::Group(Group { contents, should_break }) => {
                    let mode = if *should_break { Mode::Break } else { mode };
                    stack.extend(contents.iter().rev().map(|doc| (mode, doc)));
                }
                Document::IfBreak(IfBreak { break_contents, flat_contents }) => {
                    let contents = if mode.is_break() { break_contents } else { flat_contents };
                    stack.extend(contents.iter().rev().map(|doc| (mode, doc)));
                }
                Document::Indent(contents) | Document::Align(Align { contents, .. }) => {
                    stack.extend(contents.iter().rev().map(|doc| (mode, doc)));
                }
                Document::Trim => {
                    remaining_width += blank_tail as isize;
                    blank_tail = 0;
                }
                Document::LineSuffix(_) | Document::BreakParent | Document::Marker(_) => {}
            }

            if remaining_width < 0 {
                return false;
            }
        }
    }
}
