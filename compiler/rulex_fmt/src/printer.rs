//! Output buffer shared by node handlers.

use rulex_ir::Node;
use rulex_stack::ensure_sufficient_stack;

use crate::PrintError;

/// Renders a single node.
///
/// Implemented for [`PrintConfig`](crate::PrintConfig) and for any closure
/// `Fn(&Node, &mut Printer) -> Result<(), PrintError>`.
pub trait NodeHandler {
    fn handle(&self, node: &Node, printer: &mut Printer<'_>) -> Result<(), PrintError>;
}

impl<F> NodeHandler for F
where
    F: Fn(&Node, &mut Printer<'_>) -> Result<(), PrintError>,
{
    fn handle(&self, node: &Node, printer: &mut Printer<'_>) -> Result<(), PrintError> {
        self(node, printer)
    }
}

/// Accumulates output until the first failure, then ignores further
/// appends.
pub struct Printer<'h> {
    handler: &'h dyn NodeHandler,
    output: String,
    error: Option<PrintError>,
}

impl<'h> Printer<'h> {
    pub(crate) fn new(handler: &'h dyn NodeHandler) -> Self {
        Self {
            handler,
            output: String::new(),
            error: None,
        }
    }

    /// Append literal text.
    pub fn append_str(&mut self, text: &str) {
        if self.error.is_none() {
            self.output.push_str(text);
        }
    }

    /// Render `node` through the active handler.
    pub fn append_node(&mut self, node: &Node) {
        if self.error.is_some() {
            return;
        }
        let handler = self.handler;
        let result = ensure_sufficient_stack(|| handler.handle(node, self));
        if let Err(err) = result {
            self.fail(err);
        }
    }

    /// Render `node`, inside parentheses when `parenthesize` is set.
    pub fn append_group(&mut self, node: &Node, parenthesize: bool) {
        if parenthesize {
            self.append_str("(");
        }
        self.append_node(node);
        if parenthesize {
            self.append_str(")");
        }
    }

    /// Record a failure. Only the first one is kept.
    pub fn fail(&mut self, error: PrintError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Text appended so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub(crate) fn finish(self) -> Result<String, PrintError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }
}
