use crate::document::Align;
use crate::document::Breakable;
use crate::document::Document;
use crate::document::Group;
use crate::document::IfBreak;
use crate::document::LineSuffix;
use crate::settings::FormatSettings;

/// Stateful front-end for assembling a [`Document`] tree.
///
/// Directives are appended to the innermost open scope; [`group`],
/// [`indent`], [`align`], [`line_suffix`], and [`if_break`] open a scope
/// for the duration of a closure and splice the collected contents back on
/// exit, so scope bookkeeping cannot be left unbalanced. The tree is
/// rooted in an outer group that [`finish`] returns.
///
/// Break flags are settled here, at construction time: a forced breakable
/// or a break-parent marks every open group as broken, which is what makes
/// the printer's fit decisions correct without a second pass.
///
/// The builder also carries a stack of caller-supplied context values `C`
/// (for an AST walker, typically the nodes being visited); the engine only
/// maintains push, pop, and lookup.
///
/// [`group`]: Builder::group
/// [`indent`]: Builder::indent
/// [`align`]: Builder::align
/// [`line_suffix`]: Builder::line_suffix
/// [`if_break`]: Builder::if_break
/// [`finish`]: Builder::finish
#[derive(Debug)]
pub struct Builder<'a, C = ()> {
    settings: FormatSettings,
    frames: Vec<Frame<'a>>,
    contexts: Vec<C>,
}

#[derive(Debug)]
struct Frame<'a> {
    kind: FrameKind,
    documents: Vec<Document<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    /// An open group; `broken` is its break flag while still open.
    Group { broken: bool },
    /// Indent, align, or an if-break branch: break propagation passes
    /// through these to the enclosing groups.
    Transparent,
    /// Line-suffix contents are deferred mini-documents; break
    /// propagation stops here.
    Suffix,
}

/// Fluent continuation returned by [`Builder::if_break`]; dropping it
/// leaves the flat branch empty.
pub struct IfBreakGuard<'a, 'b, C> {
    builder: &'b mut Builder<'a, C>,
    index: usize,
    discard_flat: bool,
}

impl<'a, C> Builder<'a, C> {
    pub fn new(settings: FormatSettings) -> Self {
        Self {
            settings,
            frames: vec![Frame { kind: FrameKind::Group { broken: false }, documents: vec![] }],
            contexts: vec![],
        }
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// Appends a pre-built document to the current scope.
    pub fn push(&mut self, document: Document<'a>) {
        self.target().push(document);
    }

    pub fn text(&mut self, text: &'a str) {
        self.push(Document::Text(text));
    }

    /// Appends a zero-width passthrough; see [`Document::Marker`].
    pub fn marker(&mut self, text: &'a str) {
        self.push(Document::Marker(text));
    }

    /// Appends a breakable whose flat separator is `separator`, measured
    /// in display columns.
    pub fn breakable(&mut self, separator: &'a str) {
        self.push(Document::Breakable(Breakable::new(separator)));
    }

    /// `" "` when flat, an indented newline when broken.
    pub fn breakable_space(&mut self) {
        self.push(Document::Breakable(Breakable::SPACE));
    }

    /// Nothing when flat, an indented newline when broken.
    pub fn breakable_empty(&mut self) {
        self.push(Document::Breakable(Breakable::EMPTY));
    }

    /// An unavoidable indented newline; every open group becomes broken.
    pub fn breakable_force(&mut self) {
        self.push(Document::Breakable(Breakable::FORCE));
        self.propagate_break();
    }

    /// An unavoidable newline that restarts the next line at column zero;
    /// every open group becomes broken.
    pub fn breakable_return(&mut self) {
        self.push(Document::Breakable(Breakable::RETURN));
        self.propagate_break();
    }

    pub fn trim(&mut self) {
        self.push(Document::Trim);
    }

    /// Appends a break-parent marker and sets the break flag on every open
    /// group, innermost first.
    pub fn break_parent(&mut self) {
        self.push(Document::BreakParent);
        self.propagate_break();
    }

    /// Forces the innermost open group, and transitively its ancestors, to
    /// render broken; equivalent to [`break_parent`](Builder::break_parent)
    /// at the same point.
    pub fn break_group(&mut self) {
        self.break_parent();
    }

    /// Opens a group, runs `build` with directives targeting it, and
    /// appends the closed group. Returns the appended node so callers can
    /// inspect it or post-process it in place.
    pub fn group<F>(&mut self, build: F) -> &mut Document<'a>
    where
        F: FnOnce(&mut Self),
    {
        self.frames.push(Frame { kind: FrameKind::Group { broken: false }, documents: vec![] });
        build(self);

        let Some(frame) = self.frames.pop() else {
            unreachable!();
        };
        let FrameKind::Group { broken } = frame.kind else {
            unreachable!();
        };

        self.push(Document::Group(Group::new(frame.documents).with_break(broken)));

        let Some(document) = self.target().last_mut() else {
            unreachable!();
        };
        document
    }

    /// Wraps the directives appended by `build` in an indent node.
    pub fn indent<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Self),
    {
        let contents = self.scoped(FrameKind::Transparent, build);
        self.push(Document::Indent(contents));
    }

    /// Wraps the directives appended by `build` in an align node with the
    /// given signed column delta.
    pub fn align<F>(&mut self, delta: isize, build: F)
    where
        F: FnOnce(&mut Self),
    {
        let contents = self.scoped(FrameKind::Transparent, build);
        self.push(Document::Align(Align { delta, contents }));
    }

    /// Defers the directives appended by `build` until just before the
    /// next line break; `priority` orders deferrals flushed at the same
    /// break, higher last.
    pub fn line_suffix<F>(&mut self, priority: u8, build: F)
    where
        F: FnOnce(&mut Self),
    {
        let contents = self.scoped(FrameKind::Suffix, build);
        self.push(Document::LineSuffix(LineSuffix { priority, contents }));
    }

    /// Appends an [`IfBreak`] whose break branch is built by `build`; the
    /// returned guard's [`if_flat`](IfBreakGuard::if_flat) supplies the
    /// flat branch.
    ///
    /// When the innermost open group is already known to be broken the
    /// flat branch can never render; its builder still runs, so that any
    /// break-parents inside it propagate, but its output is discarded.
    pub fn if_break<F>(&mut self, build: F) -> IfBreakGuard<'a, '_, C>
    where
        F: FnOnce(&mut Self),
    {
        let discard_flat = self.current_group_broken();
        let break_contents = self.scoped(FrameKind::Transparent, build);
        self.push(Document::IfBreak(IfBreak::then(break_contents)));

        let index = self.target().len() - 1;
        IfBreakGuard { builder: self, index, discard_flat }
    }

    /// Pushes a caller context value; the engine never inspects it.
    pub fn enter_context(&mut self, context: C) {
        self.contexts.push(context);
    }

    pub fn leave_context(&mut self) -> Option<C> {
        self.contexts.pop()
    }

    /// The innermost context, if any.
    pub fn current_context(&self) -> Option<&C> {
        self.contexts.last()
    }

    /// The context enclosing the current one.
    pub fn parent_context(&self) -> Option<&C> {
        self.nth_context(1)
    }

    /// The context `n` levels above the current one; `nth_context(0)` is
    /// the current context.
    pub fn nth_context(&self, n: usize) -> Option<&C> {
        let length = self.contexts.len();
        (length > n).then(|| &self.contexts[length - n - 1])
    }

    /// Iterates contexts innermost first.
    pub fn contexts(&self) -> impl Iterator<Item = &C> {
        self.contexts.iter().rev()
    }

    /// See [`Document::last_position`].
    pub fn last_position(&self, document: &Document<'a>) -> usize {
        document.last_position()
    }

    /// See [`Document::remove_breaks`].
    pub fn remove_breaks(&self, document: &mut Document<'a>, replacement: &'a str) {
        document.remove_breaks(replacement);
    }

    /// Closes the root group and returns the finished tree.
    pub fn finish(mut self) -> Document<'a> {
        debug_assert!(self.frames.len() == 1, "scopes are closed by their closures");

        let Some(frame) = self.frames.pop() else {
            unreachable!();
        };
        let FrameKind::Group { broken } = frame.kind else {
            unreachable!();
        };

        Document::Group(Group::new(frame.documents).with_break(broken))
    }

    /// Finishes the tree and prints it with the builder's settings.
    pub fn format(self) -> String {
        let settings = self.settings;
        crate::format(self.finish(), settings)
    }

    fn target(&mut self) -> &mut Vec<Document<'a>> {
        let Some(frame) = self.frames.last_mut() else {
            unreachable!();
        };
        &mut frame.documents
    }

    fn scoped<F>(&mut self, kind: FrameKind, build: F) -> Vec<Document<'a>>
    where
        F: FnOnce(&mut Self),
    {
        self.frames.push(Frame { kind, documents: vec![] });
        build(self);

        let Some(frame) = self.frames.pop() else {
            unreachable!();
        };
        frame.documents
    }

    /// Sets the break flag on every open group, innermost first, stopping
    /// at the first group already broken: its own ancestors were flagged
    /// when it was.
    fn propagate_break(&mut self) {
        for frame in self.frames.iter_mut().rev() {
            match &mut frame.kind {
                FrameKind::Group { broken } => {
                    if *broken {
                        break;
                    }
                    *broken = true;
                }
                FrameKind::Transparent => {}
                FrameKind::Suffix => break,
            }
        }
    }

    fn current_group_broken(&self) -> bool {
        for frame in self.frames.iter().rev() {
            match frame.kind {
                FrameKind::Group { broken } => return broken,
                FrameKind::Suffix => return false,
                FrameKind::Transparent => {}
            }
        }

        unreachable!()
    }
}

impl<'a, C> IfBreakGuard<'a, '_, C> {
    /// Supplies the flat branch of the preceding [`Builder::if_break`].
    pub fn if_flat<F>(self, build: F)
    where
        F: FnOnce(&mut Builder<'a, C>),
    {
        let flat_contents = self.builder.scoped(FrameKind::Transparent, build);
        if self.discard_flat {
            return;
        }

        let Some(Document::IfBreak(if_break)) = self.builder.target().get_mut(self.index) else {
            unreachable!();
        };
        if_break.flat_contents = flat_contents;
    }
}
