//! Citation grouping
//!
//! Derives the ordered citation mapping the positioner traverses:
//! - one group per cited path, groups in first-encounter order
//! - entries within a group in ascending payload index
//! - file citations take precedence over directory citations
//!
//! The no-overlap guarantee of the positioning pass depends on this order
//! matching the top-to-bottom visual order of the anchors.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::payload::ResultBlock;

/// One positionable citation, joined to the layout tree by `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationEntry {
    /// Position in the original block sequence; stable across re-renders
    pub index: usize,
    /// Element id of the anchored code excerpt
    pub anchor_id: String,
    /// Element id of the attached comment
    pub comment_id: String,
    /// Whether this anchor is the last one of its group
    pub is_last_in_group: bool,
}

impl CitationEntry {
    fn new(index: usize) -> Self {
        Self {
            index,
            anchor_id: format!("code-{index}"),
            comment_id: format!("comment-{index}"),
            is_last_in_group: false,
        }
    }
}

/// Ordered citation mapping: path -> entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationGroups {
    groups: IndexMap<String, Vec<CitationEntry>>,
}

impl CitationGroups {
    fn push(&mut self, path: &str, index: usize) {
        self.groups
            .entry(path.to_string())
            .or_insert_with(Vec::new)
            .push(CitationEntry::new(index));
    }

    /// Mark the last entry of every group; its anchor carries less
    /// trailing chrome than anchors followed by more code parts
    fn mark_group_tails(&mut self) {
        for entries in self.groups.values_mut() {
            if let Some(last) = entries.last_mut() {
                last.is_last_in_group = true;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups (distinct paths)
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of entries across groups
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Entries for one path
    pub fn get(&self, path: &str) -> Option<&[CitationEntry]> {
        self.groups.get(path).map(Vec::as_slice)
    }

    /// Groups in stored (payload) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CitationEntry])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All entries in traversal order: group order, then ascending index
    pub fn entries(&self) -> impl Iterator<Item = &CitationEntry> {
        self.groups.values().flatten()
    }
}

/// File and directory citations extracted from one result payload
///
/// Immutable for the lifetime of one rendered result; rebuilt whenever the
/// payload or the active record changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Citations {
    files: CitationGroups,
    directories: CitationGroups,
}

impl Citations {
    /// Group citation-like blocks by path, keeping payload order
    ///
    /// Blocks without a path never reach the positioner.
    pub fn from_results(blocks: &[ResultBlock]) -> Self {
        let mut files = CitationGroups::default();
        let mut directories = CitationGroups::default();

        for (index, block) in blocks.iter().enumerate() {
            let (target, path) = match block {
                ResultBlock::Cite(c) => (&mut files, c.path.as_deref()),
                ResultBlock::Directory(d) => (&mut directories, d.path.as_deref()),
                _ => continue,
            };
            match path {
                Some(path) if !path.is_empty() => target.push(path, index),
                _ => trace!(index, "citation without path, dropping"),
            }
        }

        files.mark_group_tails();
        directories.mark_group_tails();

        debug!(
            file_entries = files.entry_count(),
            directory_entries = directories.entry_count(),
            "grouped citations"
        );
        Self { files, directories }
    }

    /// The mapping the positioner traverses: file citations win when any
    /// exist, otherwise directory citations
    pub fn active(&self) -> &CitationGroups {
        if !self.files.is_empty() {
            &self.files
        } else {
            &self.directories
        }
    }

    pub fn files(&self) -> &CitationGroups {
        &self.files
    }

    pub fn directories(&self) -> &CitationGroups {
        &self.directories
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{CiteBlock, DirectoryBlock, NewCodeBlock};

    fn cite(path: Option<&str>) -> ResultBlock {
        ResultBlock::Cite(CiteBlock {
            path: path.map(String::from),
            ..Default::default()
        })
    }

    fn dir_cite(path: &str) -> ResultBlock {
        ResultBlock::Directory(DirectoryBlock {
            path: Some(path.into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_groups_keep_payload_order() {
        let blocks = vec![
            cite(Some("src/b.rs")),
            ResultBlock::New(NewCodeBlock::default()),
            cite(Some("src/a.rs")),
            cite(Some("src/b.rs")),
        ];
        let citations = Citations::from_results(&blocks);
        let groups: Vec<_> = citations.files().iter().collect();

        // Group order = first-encounter order, not alphabetical
        assert_eq!(groups[0].0, "src/b.rs");
        assert_eq!(groups[1].0, "src/a.rs");

        // Entries keep ascending payload index, non-citation blocks still
        // consume an index slot
        let b_indices: Vec<_> = groups[0].1.iter().map(|e| e.index).collect();
        assert_eq!(b_indices, vec![0, 3]);

        // Traversal order across groups
        let all: Vec<_> = citations.files().entries().map(|e| e.index).collect();
        assert_eq!(all, vec![0, 3, 2]);
    }

    #[test]
    fn test_last_in_group_marking_and_ids() {
        let blocks = vec![
            cite(Some("src/a.rs")),
            cite(Some("src/a.rs")),
            cite(Some("src/z.rs")),
        ];
        let citations = Citations::from_results(&blocks);
        let a = citations.files().get("src/a.rs").unwrap();

        assert!(!a[0].is_last_in_group);
        assert!(a[1].is_last_in_group);
        assert_eq!(a[1].anchor_id, "code-1");
        assert_eq!(a[1].comment_id, "comment-1");

        let z = citations.files().get("src/z.rs").unwrap();
        assert!(z[0].is_last_in_group);
    }

    #[test]
    fn test_malformed_citations_are_excluded() {
        let blocks = vec![cite(None), cite(Some("")), cite(Some("src/ok.rs"))];
        let citations = Citations::from_results(&blocks);

        assert_eq!(citations.files().entry_count(), 1);
        assert_eq!(citations.files().entries().next().unwrap().index, 2);
    }

    #[test]
    fn test_file_citations_take_precedence() {
        let blocks = vec![dir_cite("src"), cite(Some("src/a.rs"))];
        let citations = Citations::from_results(&blocks);

        assert_eq!(citations.active().entry_count(), 1);
        assert_eq!(citations.active().entries().next().unwrap().index, 1);

        // Directory mapping becomes active only without file citations
        let dirs_only = Citations::from_results(&[dir_cite("src"), dir_cite("docs")]);
        assert_eq!(dirs_only.active().entry_count(), 2);
        assert_eq!(dirs_only.active().group_count(), 2);
    }

    #[test]
    fn test_empty_payload_yields_empty_mapping() {
        let citations = Citations::from_results(&[]);
        assert!(citations.is_empty());
        assert!(citations.active().is_empty());
    }
}
