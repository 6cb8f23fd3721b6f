//! Result payload model
//!
//! Typed view of the ordered block sequence a finished result is made of:
//! - `Cite` - annotated code excerpt in a file, with a comment
//! - `Directory` - directory-level citation
//! - `New` - freshly generated code
//! - `Modify` - a diff against an existing file
//!
//! The wire form is externally tagged JSON (`{"Cite": {...}}`), matching
//! the server payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from decoding a result payload
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid result payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One block of a result payload, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultBlock {
    /// File citation with an attached comment
    Cite(CiteBlock),
    /// Directory citation with an attached comment
    Directory(DirectoryBlock),
    /// Newly generated code
    New(NewCodeBlock),
    /// Modification to an existing file, as a diff
    Modify(ModifyBlock),
}

/// A citation into a file region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CiteBlock {
    /// Path of the cited file; citations without a path are dropped
    pub path: Option<String>,
    /// Comment text shown next to the excerpt
    pub comment: Option<String>,
    /// First cited line (1-based)
    pub start_line: Option<u32>,
    /// Last cited line (1-based)
    pub end_line: Option<u32>,
}

/// A citation of a whole directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryBlock {
    /// Path of the cited directory
    pub path: Option<String>,
    /// Comment text shown next to the listing
    pub comment: Option<String>,
}

/// A generated code block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCodeBlock {
    pub code: Option<String>,
    pub language: Option<String>,
}

/// A diff block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifyBlock {
    pub path: Option<String>,
    pub diff: Option<String>,
    pub language: Option<String>,
}

impl ResultBlock {
    /// Whether this block participates in citation grouping
    pub fn is_citation_like(&self) -> bool {
        matches!(self, ResultBlock::Cite(_) | ResultBlock::Directory(_))
    }
}

/// Decode a result payload from its JSON wire form
pub fn parse_results(json: &str) -> Result<Vec<ResultBlock>, PayloadError> {
    Ok(serde_json::from_str(json)?)
}

/// Blocks the renderer paints outside the annotation flow
///
/// New-code blocks need both code and language to render; diffs need a
/// diff body. Incomplete blocks are dropped here, same as citation-like
/// blocks without a path are dropped at grouping.
pub fn other_blocks(blocks: &[ResultBlock]) -> impl Iterator<Item = &ResultBlock> {
    blocks.iter().filter(|b| match b {
        ResultBlock::New(n) => n.code.is_some() && n.language.is_some(),
        ResultBlock::Modify(m) => m.diff.is_some(),
        _ => false,
    })
}
