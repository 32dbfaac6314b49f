// src/formatting/state.rs
//! Immutable formatting state threaded through sibling blocks.
//!
//! Every transition returns a new context; the renderer never mutates one
//! in place.

/// Where the renderer is within the block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
    /// Nesting depth: 0 for top-level blocks.
    depth: usize,
    /// Number for the next numbered list item in the current run.
    list_number: usize,
    /// Rows rendered so far when inside a table.
    table_rows: Option<usize>,
}

impl FormatContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            list_number: 1,
            table_rows: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for a block's children: one level deeper, fresh numbering, no table.
    pub fn enter_children(&self) -> Self {
        Self {
            depth: self.depth + 1,
            list_number: 1,
            table_rows: None,
        }
    }

    pub fn current_list_number(&self) -> usize {
        self.list_number
    }

    pub fn increment_list_number(&self) -> Self {
        Self {
            list_number: self.list_number + 1,
            ..self.clone()
        }
    }

    /// Ends a numbered run; the next numbered item starts again at 1.
    pub fn reset_list(&self) -> Self {
        Self {
            list_number: 1,
            ..self.clone()
        }
    }

    /// Context for a table's rows.
    pub fn enter_table(&self) -> Self {
        Self {
            table_rows: Some(0),
            ..self.enter_children()
        }
    }

    pub fn process_table_row(&self) -> Self {
        Self {
            table_rows: self.table_rows.map(|rows| rows + 1),
            ..self.clone()
        }
    }

    /// True for the first row of a table, which gets the header separator.
    pub fn is_first_table_row(&self) -> bool {
        self.table_rows == Some(0)
    }
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_runs_and_resets() {
        let ctx = FormatContext::new();
        assert_eq!(ctx.current_list_number(), 1);
        let ctx = ctx.increment_list_number().increment_list_number();
        assert_eq!(ctx.current_list_number(), 3);
        assert_eq!(ctx.reset_list().current_list_number(), 1);
    }

    #[test]
    fn children_start_fresh() {
        let ctx = FormatContext::new().increment_list_number();
        let child = ctx.enter_children();
        assert_eq!(child.depth(), 1);
        assert_eq!(child.current_list_number(), 1);
        assert_eq!(ctx.current_list_number(), 2);
    }

    #[test]
    fn only_the_first_table_row_is_first() {
        let table = FormatContext::new().enter_table();
        assert!(table.is_first_table_row());
        assert!(!table.process_table_row().is_first_table_row());
        assert!(!FormatContext::new().is_first_table_row());
    }
}
