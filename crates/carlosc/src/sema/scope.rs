//! Symbol table and scope management

use std::collections::HashMap;

use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::common::Span;
use crate::types::Type;

/// A declared entity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub ty: Type,
    /// Where the entity was declared
    pub span: Span,
}

impl Entity {
    pub fn new(kind: EntityKind, ty: Type, span: Span) -> Self {
        Self { kind, ty, span }
    }

    pub fn variable(ty: Type, span: Span) -> Self {
        Self::new(EntityKind::Variable, ty, span)
    }

    pub fn parameter(ty: Type, span: Span) -> Self {
        Self::new(EntityKind::Parameter, ty, span)
    }

    pub fn function(ty: Type, span: Span) -> Self {
        Self::new(EntityKind::Function, ty, span)
    }

    /// Variables and parameters hold values; functions do not
    pub fn is_value(&self) -> bool {
        matches!(self.kind, EntityKind::Variable | EntityKind::Parameter)
    }
}

/// Kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Variable,
    Parameter,
    Function,
}

/// Error when defining a symbol
#[derive(Debug, Clone, PartialEq)]
pub enum DefineError {
    /// Symbol already exists in the innermost frame
    AlreadyDefined { previous: Span },
}

/// One lexical frame
#[derive(Debug, Default)]
struct Frame {
    entities: HashMap<DefaultSymbol, Entity>,
}

/// Stack of scope frames, innermost last
///
/// The global frame lives outside the stack of nested frames, so it
/// can never be popped.
#[derive(Debug)]
pub struct ScopeStack {
    names: DefaultStringInterner,
    global: Frame,
    nested: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            names: DefaultStringInterner::default(),
            global: Frame::default(),
            nested: Vec::new(),
        }
    }

    /// Number of frames, including the global frame
    pub fn depth(&self) -> usize {
        self.nested.len() + 1
    }

    /// Push a new innermost frame
    pub fn push(&mut self) {
        self.nested.push(Frame::default());
    }

    /// Pop the innermost frame. Returns false if only the global frame is left.
    pub fn pop(&mut self) -> bool {
        self.nested.pop().is_some()
    }

    fn innermost(&self) -> &Frame {
        self.nested.last().unwrap_or(&self.global)
    }

    fn innermost_mut(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.global)
    }

    /// Define a new entity in the innermost frame. The first definition wins.
    pub fn define(&mut self, name: &str, entity: Entity) -> Result<(), DefineError> {
        let symbol = self.names.get_or_intern(name);
        let frame = self.innermost_mut();
        if let Some(existing) = frame.entities.get(&symbol) {
            return Err(DefineError::AlreadyDefined {
                previous: existing.span,
            });
        }
        frame.entities.insert(symbol, entity);
        Ok(())
    }

    /// Look up a name, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        let symbol = self.names.get(name)?;
        self.nested
            .iter()
            .rev()
            .chain(std::iter::once(&self.global))
            .find_map(|frame| frame.entities.get(&symbol))
    }

    /// Look up a name in the innermost frame only
    pub fn lookup_local(&self, name: &str) -> Option<&Entity> {
        let symbol = self.names.get(name)?;
        self.innermost().entities.get(&symbol)
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
