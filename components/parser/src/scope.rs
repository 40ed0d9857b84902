//! Symbol tables for name resolution during code generation
//!
//! A [`SymbolTable`] assigns slots per storage class. The class table holds
//! statics and fields for the whole class; a [`RoutineScope`] owns a fresh
//! table of arguments and locals and borrows the class table for lookups.

use std::collections::HashMap;
use std::fmt;

use vm_code::Segment;

use crate::ast::SubroutineKind;

/// Where a variable lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Per-class static slot
    Static,
    /// Field of the active object
    Field,
    /// Routine argument
    Argument,
    /// Routine local
    Local,
}

impl StorageClass {
    /// The segment that accesses of this storage class compile to
    pub fn segment(self) -> Segment {
        match self {
            StorageClass::Static => Segment::Static,
            StorageClass::Field => Segment::This,
            StorageClass::Argument => Segment::Argument,
            StorageClass::Local => Segment::Local,
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageClass::Static => "static",
            StorageClass::Field => "field",
            StorageClass::Argument => "argument",
            StorageClass::Local => "local",
        })
    }
}

/// A resolved variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Variable name
    pub name: String,
    /// Storage class
    pub storage: StorageClass,
    /// Slot within the storage class
    pub index: u16,
    /// Declared type name (`int`, `char`, `boolean` or a class name)
    pub type_name: String,
}

/// Slot assignment for one or more storage classes
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<(StorageClass, String), Symbol>,
    counts: HashMap<StorageClass, u16>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable in the next free slot of its storage class.
    ///
    /// A name already registered in the same storage class keeps its slot.
    pub fn define(&mut self, name: &str, storage: StorageClass, type_name: &str) -> &Symbol {
        let counts = &mut self.counts;
        self.symbols
            .entry((storage, name.to_string()))
            .or_insert_with(|| {
                let slot = counts.entry(storage).or_insert(0);
                let index = *slot;
                *slot += 1;
                Symbol {
                    name: name.to_string(),
                    storage,
                    index,
                    type_name: type_name.to_string(),
                }
            })
    }

    /// Take the next slot of a storage class without naming it
    pub fn reserve(&mut self, storage: StorageClass) -> u16 {
        let slot = self.counts.entry(storage).or_insert(0);
        let index = *slot;
        *slot += 1;
        index
    }

    /// Look a name up in one storage class
    pub fn get(&self, name: &str, storage: StorageClass) -> Option<&Symbol> {
        self.symbols.get(&(storage, name.to_string()))
    }

    /// Number of slots taken in a storage class
    pub fn count(&self, storage: StorageClass) -> u16 {
        self.counts.get(&storage).copied().unwrap_or(0)
    }
}

/// Name resolution for the routine being generated
#[derive(Debug)]
pub struct RoutineScope<'c> {
    class: &'c SymbolTable,
    routine: SymbolTable,
    kind: SubroutineKind,
}

impl<'c> RoutineScope<'c> {
    /// Open a scope for a routine of the given kind.
    ///
    /// Methods reserve argument 0 for the receiver.
    pub fn new(class: &'c SymbolTable, kind: SubroutineKind) -> Self {
        let mut routine = SymbolTable::new();
        if kind == SubroutineKind::Method {
            routine.reserve(StorageClass::Argument);
        }
        Self {
            class,
            routine,
            kind,
        }
    }

    /// Register a parameter
    pub fn define_argument(&mut self, name: &str, type_name: &str) -> &Symbol {
        self.routine.define(name, StorageClass::Argument, type_name)
    }

    /// Register a `var` local
    pub fn define_local(&mut self, name: &str, type_name: &str) -> &Symbol {
        self.routine.define(name, StorageClass::Local, type_name)
    }

    /// Number of locals registered so far
    pub fn local_count(&self) -> u16 {
        self.routine.count(StorageClass::Local)
    }

    /// Resolve a bare identifier: local, argument, field, then static.
    ///
    /// Fields are invisible inside a function, which has no receiver.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.routine
            .get(name, StorageClass::Local)
            .or_else(|| self.routine.get(name, StorageClass::Argument))
            .or_else(|| {
                if self.kind.has_receiver() {
                    self.class.get(name, StorageClass::Field)
                } else {
                    None
                }
            })
            .or_else(|| self.class.get(name, StorageClass::Static))
    }
}
