use indexmap::IndexMap;

// Labels address a flat, dense instruction index, not a byte offset.
// Explicit `name=value` labels may bind arbitrary addresses (memory
// mapped IO and the like), which is legal.

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: IndexMap::new(),
        }
    }

    /// Returns the previous address when the name was already bound
    pub fn insert(&mut self, name: &str, address: i64) -> Option<i64> {
        self.symbols.insert(name.to_string(), address)
    }

    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
