use std::{
    collections::VecDeque,
    fmt::{self, Write as _},
    fs::File,
    io::Write,
    path::Path,
};

use crate::{
    book_index::BookIndex, events::CatalogEvent, patron_index::PatronIndex, tree::SearchTree,
};

/// Shape of a search tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of nodes
    pub len: usize,
    /// Nodes on the longest root to leaf path
    pub height: usize,
}

impl TreeStats {
    /// Measure `tree`
    #[must_use]
    pub fn of<K: Ord, V>(tree: &SearchTree<K, V>) -> Self {
        Self { len: tree.len(), height: tree.height() }
    }

    /// Whether every node has at most one child, i.e. the tree is a list
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.len > 2 && self.height == self.len
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes, height {}", self.len, self.height)
    }
}

/// Graphviz and table renderings of the catalog
#[derive(Debug)]
pub struct TreeVisualization;

impl TreeVisualization {
    /// DOT graph of the book tree; shelved books green, books on loan grey
    #[must_use]
    pub fn book_dot(books: &BookIndex) -> String {
        Self::render("books", books.tree(), |id, book| {
            let fill = if book.available { "palegreen" } else { "lightgrey" };
            format!("label=\"{id}: {}\", fillcolor={fill}", escape(&book.title))
        })
    }

    /// DOT graph of the patron tree; patrons holding books are highlighted
    #[must_use]
    pub fn patron_dot(patrons: &PatronIndex) -> String {
        Self::render("patrons", patrons.tree(), |id, patron| {
            let fill = if patron.borrowed.is_empty() { "lightblue" } else { "gold" };
            format!(
                "label=\"{id}: {} ({} on loan)\", fillcolor={fill}",
                escape(&patron.name),
                patron.borrowed.len()
            )
        })
    }

    /// Save a DOT representation to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to
    pub fn save_dot_to_file(dot: &str, path: &Path) -> Result<(), std::io::Error> {
        let mut file = File::create(path)?;
        file.write_all(dot.as_bytes())?;
        Ok(())
    }

    /// Markdown table of recorded catalog events
    #[must_use]
    pub fn history_table(events: &VecDeque<CatalogEvent>) -> String {
        if events.is_empty() {
            return "No events recorded yet.".to_string();
        }

        let mut table = String::from("| # | Event | Book | Patron |\n");
        table.push_str("|---|-------|------|--------|\n");

        for (idx, event) in events.iter().enumerate() {
            let (name, book, patron) = match event {
                CatalogEvent::BookAdded { book_id } => ("book added", Some(book_id), None),
                CatalogEvent::BookUpdated { book_id } => ("book updated", Some(book_id), None),
                CatalogEvent::PatronAdded { patron_id } => ("patron added", None, Some(patron_id)),
                CatalogEvent::PatronAutoCreated { patron_id } => {
                    ("patron auto-created", None, Some(patron_id))
                }
                CatalogEvent::Borrowed { book_id, patron_id, .. } => {
                    ("borrowed", Some(book_id), Some(patron_id))
                }
                CatalogEvent::Returned { book_id, patron_id } => {
                    ("returned", Some(book_id), Some(patron_id))
                }
            };
            // Writing into a String cannot fail
            let _ = writeln!(
                table,
                "| {} | {name} | {} | {} |",
                idx.saturating_add(1),
                book.map_or_else(String::new, ToString::to_string),
                patron.map_or_else(String::new, ToString::to_string),
            );
        }

        table
    }

    /// Shared DOT layout: one node per entry, edges labelled with the child side
    fn render<K, V, F>(name: &str, tree: &SearchTree<K, V>, node_attrs: F) -> String
    where
        K: Ord + fmt::Display,
        F: Fn(&K, &V) -> String,
    {
        let mut dot = format!("digraph {name} {{\n");
        dot.push_str("  node [shape=box, style=filled];\n");

        for (key, value) in tree {
            let _ = writeln!(dot, "  \"{key}\" [{}];", node_attrs(key, value));
        }
        for edge in tree.edges() {
            let _ = writeln!(
                dot,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                edge.parent, edge.child, edge.side
            );
        }

        dot.push_str("}\n");
        dot
    }
}

/// Escape a label for use inside a quoted DOT string
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
