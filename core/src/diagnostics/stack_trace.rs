use crate::vm::bytecode::CodeUnitRef;

/// One captured frame. `code_unit == None` marks a native frame, whose
/// offset carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEntry {
    pub code_unit: Option<CodeUnitRef>,
    pub offset: u32,
}

impl FrameEntry {
    pub fn new(code_unit: Option<CodeUnitRef>, offset: u32) -> Self {
        Self { code_unit, offset }
    }

    pub fn native() -> Self {
        Self::new(None, 0)
    }

    pub fn is_native(&self) -> bool {
        self.code_unit.is_none()
    }
}

/// Captured frames, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    entries: Vec<FrameEntry>,
}

impl StackTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<FrameEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FrameEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: FrameEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<FrameEntry> {
        self.entries.pop()
    }
}
