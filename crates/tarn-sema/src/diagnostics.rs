//! The diagnostics sink every rule reports through.

use tarn_identity::Span;

use crate::errors::{Classification, SemanticError};

/// A classified finding wrapping a miette-enabled SemanticError
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub error: SemanticError,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(span: Span, context: impl Into<String>, classification: Classification) -> Self {
        Self {
            error: SemanticError::new(classification, context.into(), span.into()),
            span,
        }
    }

    pub fn classification(&self) -> Classification {
        self.error.classification()
    }
}

/// Accumulates diagnostics for one pass.
///
/// The sink never decides pass/fail; it only collects. Processing continues after
/// every report so one pass can surface many independent findings.
#[derive(Debug, Default, Clone)]
pub struct ErrorListener {
    errors: Vec<Diagnostic>,
}

impl ErrorListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn semantic_error(
        &mut self,
        span: Span,
        context: impl Into<String>,
        classification: Classification,
    ) {
        self.push(Diagnostic::new(span, context, classification));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            classification = %diagnostic.classification(),
            line = diagnostic.span.line,
            "semantic error"
        );
        self.errors.push(diagnostic);
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of diagnostics carrying a given classification.
    pub fn count(&self, classification: Classification) -> usize {
        self.errors
            .iter()
            .filter(|d| d.classification() == classification)
            .count()
    }

    /// Drain the collected diagnostics, ordered by source position.
    pub fn take_errors(&mut self) -> Vec<Diagnostic> {
        let mut errors = std::mem::take(&mut self.errors);
        errors.sort_by_key(|d| (d.span.line, d.span.column));
        errors
    }
}

impl Extend<Diagnostic> for ErrorListener {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_counts_by_classification() {
        let mut errors = ErrorListener::new();
        errors.semantic_error(Span::at_line(3), "wrt 'a':", Classification::NotMutable);
        errors.semantic_error(Span::at_line(1), "wrt 'b':", Classification::NotMutable);
        errors.semantic_error(Span::at_line(2), "wrt 'c':", Classification::NotReferenced);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.count(Classification::NotMutable), 2);
        assert_eq!(errors.count(Classification::NeverInitialised), 0);
    }

    #[test]
    fn take_errors_orders_by_line_and_empties_sink() {
        let mut errors = ErrorListener::new();
        errors.semantic_error(Span::at_line(9), "late:", Classification::NotResolved);
        errors.semantic_error(Span::at_line(2), "early:", Classification::NotResolved);

        let taken = errors.take_errors();
        assert_eq!(taken[0].span.line, 2);
        assert_eq!(taken[1].span.line, 9);
        assert!(!errors.has_errors());
    }
}
