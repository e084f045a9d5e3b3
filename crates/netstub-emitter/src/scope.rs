//! Class and symbol scope stacks.
//!
//! # Class scopes
//!
//! A [`ClassFrame`] is pushed for every emitted class body (types, method
//! groups, generic dispatch classes). Frames record:
//! - the emitted class name, used to disambiguate generic parameter names
//! - the generic parameters the frame introduces
//! - whether the frame *shadows* outer generics (real types do, synthetic
//!   dispatch classes are pass-through scaffolding)
//! - the dotted accessor that reaches the frame from file scope
//!
//! # Symbol scopes
//!
//! A [`SymbolFrame`] is pushed per namespace rendering pass and holds the
//! top-level names that pass emits. A type from another namespace whose
//! clean name is reserved must be referenced namespace-qualified.
//!
//! # Safety
//!
//! Both stacks hand out a [`ScopeToken`] on `enter` and require it back on
//! `leave`. Leaving anything other than the innermost frame is a
//! programming error and panics.

use netstub_model::TypeId;
use rustc_hash::FxHashSet;

/// Proof of a pushed frame; must be returned to `leave` in LIFO order.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scope token must be passed back to leave()"]
pub struct ScopeToken {
    serial: u64,
}

// =============================================================================
// Class scopes
// =============================================================================

#[derive(Debug, Clone)]
pub struct ClassFrame {
    pub name: String,
    pub generics: Vec<TypeId>,
    pub shadow: bool,
    /// Dotted path reaching this frame from file scope, e.g. `Outer_1.Foo_MethodGroup.`
    pub outside_accessor: String,
    serial: u64,
}

#[derive(Debug, Default)]
pub struct ClassScopeStack {
    frames: Vec<ClassFrame>,
    next_serial: u64,
}

impl ClassScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame. The outside accessor is the accessor of the stack as
    /// it is before this push.
    pub fn enter(&mut self, name: impl Into<String>, generics: Vec<TypeId>, shadow: bool) -> ScopeToken {
        let serial = self.next_serial;
        self.next_serial += 1;
        let outside_accessor = self.accessor();
        self.frames.push(ClassFrame {
            name: name.into(),
            generics,
            shadow,
            outside_accessor,
            serial,
        });
        ScopeToken { serial }
    }

    /// Pop the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics when `token` does not belong to the innermost frame.
    pub fn leave(&mut self, token: ScopeToken) -> ClassFrame {
        let Some(frame) = self.frames.pop() else {
            panic!("class scope stack underflow: leave() without a matching enter()");
        };
        if frame.serial != token.serial {
            panic!(
                "class scope '{}' left out of order: scopes must be left in reverse order of entry",
                frame.name
            );
        }
        frame
    }

    /// Run `f` inside a pushed frame.
    pub fn scope<T>(
        &mut self,
        name: impl Into<String>,
        generics: Vec<TypeId>,
        shadow: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let token = self.enter(name, generics, shadow);
        let result = f(self);
        self.leave(token);
        result
    }

    pub fn current(&self) -> Option<&ClassFrame> {
        self.frames.last()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current().map(|frame| frame.name.as_str())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame names joined with `.` plus a trailing `.`, or empty at file scope.
    pub fn accessor(&self) -> String {
        if self.frames.is_empty() {
            return String::new();
        }
        let mut accessor = self
            .frames
            .iter()
            .map(|frame| frame.name.as_str())
            .collect::<Vec<_>>()
            .join(".");
        accessor.push('.');
        accessor
    }

    /// Generics visible in the innermost frame: every frame from the
    /// nearest shadowing frame (inclusive) up to the top of the stack.
    pub fn accessible_generics(&self) -> Vec<TypeId> {
        let start = self.frames.iter().rposition(|frame| frame.shadow).unwrap_or(0);
        self.frames[start..]
            .iter()
            .flat_map(|frame| frame.generics.iter().copied())
            .collect()
    }
}

// =============================================================================
// Symbol scopes
// =============================================================================

#[derive(Debug, Clone)]
pub struct SymbolFrame {
    pub namespace: String,
    pub reserved: FxHashSet<String>,
    serial: u64,
}

impl SymbolFrame {
    /// A type named `clean_name` from `type_namespace` conflicts when it
    /// lives elsewhere and its name is reserved here.
    pub fn has_conflict(&self, clean_name: &str, type_namespace: &str) -> bool {
        type_namespace != self.namespace && self.reserved.contains(clean_name)
    }
}

#[derive(Debug, Default)]
pub struct SymbolScopeStack {
    frames: Vec<SymbolFrame>,
    next_serial: u64,
}

impl SymbolScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(
        &mut self,
        namespace: impl Into<String>,
        reserved: impl IntoIterator<Item = String>,
    ) -> ScopeToken {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.frames.push(SymbolFrame {
            namespace: namespace.into(),
            reserved: reserved.into_iter().collect(),
            serial,
        });
        ScopeToken { serial }
    }

    /// # Panics
    ///
    /// Panics when `token` does not belong to the innermost frame.
    pub fn leave(&mut self, token: ScopeToken) -> SymbolFrame {
        let Some(frame) = self.frames.pop() else {
            panic!("symbol scope stack underflow: leave() without a matching enter()");
        };
        if frame.serial != token.serial {
            panic!(
                "symbol scope for namespace '{}' left out of order",
                frame.namespace
            );
        }
        frame
    }

    /// True when any open frame requires qualification of this name.
    pub fn has_conflict(&self, clean_name: &str, type_namespace: &str) -> bool {
        self.frames
            .iter()
            .any(|frame| frame.has_conflict(clean_name, type_namespace))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
