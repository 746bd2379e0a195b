/// A single row of cell values, positionally aligned with a [`Header`].
///
/// Every cell is either text or absent; an absent cell is what an empty
/// field in the source artifact becomes, and what a database null is
/// written as.
///
/// [`Header`]: crate::records::Header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    cells: Vec<Option<String>>,
}

impl Record {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Record { cells }
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Mutable view that allows rewriting cell values but not the arity.
    pub fn cells_mut(&mut self) -> &mut [Option<String>] {
        &mut self.cells
    }

    /// Text of the cell at `index`, or `None` when out of range or null.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_distinguishes_null_from_out_of_range() {
        let record = Record::new(vec![Some("a".to_string()), None]);
        assert_eq!(record.cell(0), Some("a"));
        assert_eq!(record.cell(1), None);
        assert_eq!(record.cell(2), None);
        assert_eq!(record.cells().get(1), Some(&None));
        assert_eq!(record.cells().get(2), None);
    }
}
