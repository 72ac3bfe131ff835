//! Edge labels and typed indices shared by the NFA and DFA.

use std::fmt;

use indexmap::IndexSet;

use crate::selector::Condition;

/// Event label matching any element: `*|*`.
pub const WILDCARD: &str = "*|*";

/// Build the `"<namespace-or-*>|<local-or-*>"` label of an element test.
///
/// `Some("")` as namespace yields the no-namespace form `|local`.
pub fn name_label(namespace: Option<&str>, local_name: Option<&str>) -> String {
    format!("{}|{}", namespace.unwrap_or("*"), local_name.unwrap_or("*"))
}

/// The labels an element fires, most specific first.
///
/// An element without a namespace uses the reserved no-namespace labels
/// (`|local`, `|*`) in place of the namespace-qualified ones.
pub fn element_labels(namespace: Option<&str>, local_name: &str) -> [String; 4] {
    let namespace = namespace.unwrap_or("");
    [
        name_label(Some(namespace), Some(local_name)),
        name_label(None, Some(local_name)),
        name_label(Some(namespace), None),
        WILDCARD.to_string(),
    ]
}

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Return the raw index as `usize`.
            #[inline]
            pub fn idx(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(
    /// Ordinal of an NFA state.
    NfaStateId
);
index_type!(
    /// Ordinal of a DFA state.
    DfaStateId
);
index_type!(
    /// Interned element-name label.
    Symbol
);
index_type!(
    /// Interned condition label.
    ConditionId
);
index_type!(
    /// Index into the compiled declaration table.
    DeclarationId
);

/// Input symbol of a consuming transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// An element-name label such as `ns|p` or `*|*`.
    Name(Symbol),
    /// The sibling sentinel, stepped when moving to the next sibling.
    Sibling,
}

/// Interned element-name labels and conditions.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    names: IndexSet<String>,
    conditions: IndexSet<Condition>,
}

impl Labels {
    /// Create an empty label table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an element-name label.
    pub fn intern_name(&mut self, label: String) -> Symbol {
        let (idx, _) = self.names.insert_full(label);
        Symbol::new(idx)
    }

    /// Look up an element-name label without interning it.
    pub fn symbol(&self, label: &str) -> Option<Symbol> {
        self.names.get_index_of(label).map(Symbol::new)
    }

    /// The text of an interned name label.
    pub fn name(&self, symbol: Symbol) -> &str {
        &self.names[symbol.idx()]
    }

    /// Intern a condition.
    pub fn intern_condition(&mut self, condition: Condition) -> ConditionId {
        let (idx, _) = self.conditions.insert_full(condition);
        ConditionId::new(idx)
    }

    /// The condition behind an interned id.
    pub fn condition(&self, id: ConditionId) -> &Condition {
        &self.conditions[id.idx()]
    }

    /// Number of distinct name labels.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct conditions.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Symbols for the labels an element fires, skipping labels no edge uses.
    pub fn element_symbols(&self, namespace: Option<&str>, local_name: &str) -> Vec<Symbol> {
        let mut symbols = Vec::with_capacity(4);
        for label in element_labels(namespace, local_name) {
            if let Some(symbol) = self.symbol(&label) {
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        symbols
    }

    /// Render a label for diagnostics.
    pub fn describe(&self, label: Label) -> String {
        match label {
            Label::Name(symbol) => self.name(symbol).to_string(),
            Label::Sibling => "SIBLING".to_string(),
        }
    }
}
