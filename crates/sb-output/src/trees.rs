//! Tree files: one annotated and one collapsed Newick line per tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sb_tree::{SeedbankTree, to_collapsed_newick, to_newick};

use crate::OutputResult;

pub const ANNOTATED_FILE: &str = "tree.newick";
pub const COLLAPSED_FILE: &str = "tree_collapsed.newick";

pub struct TreeFiles {
    annotated: BufWriter<File>,
    collapsed: BufWriter<File>,
    written:   usize,
}

impl TreeFiles {
    /// Create (truncating) both files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            annotated: BufWriter::new(File::create(dir.join(ANNOTATED_FILE))?),
            collapsed: BufWriter::new(File::create(dir.join(COLLAPSED_FILE))?),
            written:   0,
        })
    }

    /// Append `tree` to both files.
    pub fn write_tree(&mut self, tree: &SeedbankTree) -> OutputResult<()> {
        writeln!(self.annotated, "{}", to_newick(tree)?)?;
        writeln!(self.collapsed, "{}", to_collapsed_newick(tree)?)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        self.annotated.flush()?;
        self.collapsed.flush()?;
        Ok(())
    }
}
