/// One row of a function's debug table: code at `address` and beyond (until
/// the next row) came from `filename_id:line:column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugSourceLocation {
    pub address: u32,
    pub filename_id: u32,
    pub line: u32,
    pub column: u32,
}

impl DebugSourceLocation {
    pub fn new(address: u32, filename_id: u32, line: u32, column: u32) -> Self {
        Self {
            address,
            filename_id,
            line,
            column,
        }
    }
}

/// Per-module debug metadata: a filename table and one location table per
/// function that was compiled with debug info.
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    filenames: Vec<String>,
    tables: Vec<Vec<DebugSourceLocation>>,
}

impl DebugInfo {
    pub fn new(filenames: Vec<String>) -> Self {
        Self {
            filenames,
            tables: Vec::new(),
        }
    }

    /// Adds a location table and returns its index.
    pub fn add_table(&mut self, mut locations: Vec<DebugSourceLocation>) -> usize {
        locations.sort_by_key(|loc| loc.address);
        self.tables.push(locations);
        self.tables.len() - 1
    }

    pub fn filename_by_id(&self, id: u32) -> Option<&str> {
        self.filenames.get(id as usize).map(String::as_str)
    }

    /// The row covering `address` in table `table`: the one with the
    /// greatest address not past it.
    pub fn location_for_address(&self, table: usize, address: u32) -> Option<DebugSourceLocation> {
        let rows = self.tables.get(table)?;
        let idx = match rows.binary_search_by_key(&address, |loc| loc.address) {
            Ok(i) => i,
            Err(0) => return None,
            Err(i) => i - 1,
        };
        rows.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DebugInfo, usize) {
        let mut info = DebugInfo::new(vec!["main.js".to_string()]);
        let table = info.add_table(vec![
            DebugSourceLocation::new(8, 0, 3, 5),
            DebugSourceLocation::new(2, 0, 2, 1),
        ]);
        (info, table)
    }

    #[test]
    fn finds_covering_row() {
        let (info, table) = sample();
        let loc = info
            .location_for_address(table, 5)
            .expect("address 5 is covered by the row at 2");
        assert_eq!((loc.line, loc.column), (2, 1));

        let loc = info
            .location_for_address(table, 8)
            .expect("exact match should resolve");
        assert_eq!((loc.line, loc.column), (3, 5));
    }

    #[test]
    fn address_before_first_row_is_unmapped() {
        let (info, table) = sample();
        assert!(info.location_for_address(table, 1).is_none());
        assert!(info.location_for_address(table + 1, 4).is_none());
    }

    #[test]
    fn filename_lookup() {
        let (info, _) = sample();
        assert_eq!(info.filename_by_id(0), Some("main.js"));
        assert_eq!(info.filename_by_id(1), None);
    }
}
