use std::iter;

use la_arena::{Arena, Idx};

use crate::symbol::Symbol;

/// One binding group, linked to the scope it extends.
struct Frame {
    parent: Scope,
    names: Vec<Symbol>,
    /// Number of names visible through this frame, parents included.
    len: usize,
}

/// Handle to an immutable set of bound names.
///
/// A scope is never modified after it is created. Deriving a scope for a
/// sibling branch is a copy of the handle, and extending one allocates a new
/// frame pointing at the old handle, so bindings made in one branch cannot
/// leak into another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scope(Option<Idx<Frame>>);

impl Scope {
    pub const EMPTY: Scope = Scope(None);

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Owns every scope frame allocated while generating one program.
#[derive(Default)]
pub struct Environment {
    frames: Arena<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a scope holding everything in `base` plus `names`.
    pub fn extend(&mut self, base: Scope, names: Vec<Symbol>) -> Scope {
        if names.is_empty() {
            return base;
        }
        let len = self.len(base) + names.len();
        Scope(Some(self.frames.alloc(Frame {
            parent: base,
            names,
            len,
        })))
    }

    pub fn contains(&self, scope: Scope, name: Symbol) -> bool {
        self.frames(scope).any(|frame| frame.names.contains(&name))
    }

    pub fn len(&self, scope: Scope) -> usize {
        scope.0.map_or(0, |idx| self.frames[idx].len)
    }

    /// List all names bound in `scope`, innermost binding group first and
    /// each group in binding order.
    pub fn bindings(&self, scope: Scope) -> impl Iterator<Item = Symbol> + '_ {
        self.frames(scope)
            .flat_map(|frame| frame.names.iter().copied())
    }

    /// The first name in iteration order, if any.
    pub fn first(&self, scope: Scope) -> Option<Symbol> {
        self.bindings(scope).next()
    }

    /// The `n`th name in iteration order.
    pub fn nth(&self, scope: Scope, n: usize) -> Option<Symbol> {
        self.bindings(scope).nth(n)
    }

    /// Number of frames allocated so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frames(&self, scope: Scope) -> impl Iterator<Item = &Frame> + '_ {
        iter::successors(scope.0.map(|idx| &self.frames[idx]), move |frame| {
            frame.parent.0.map(|idx| &self.frames[idx])
        })
    }
}
