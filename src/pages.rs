//! Collecting detected lines into one text record per document page.

use std::collections::HashMap;

use schemars::JsonSchema;

use crate::{
    ocr::{BlockKind, DetectedBlock},
    prelude::*,
};

/// One output row: all the text on one page of a document.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageRecord {
    /// The source document's name.
    pub document: String,

    /// The 1-based page number.
    pub page: i64,

    /// Every line on the page, joined with single spaces.
    pub content: String,
}

/// Page records keyed by page number, in the order pages were first seen.
///
/// Text for a page that already has a record is appended to that record,
/// never written over it. This holds across any number of calls to
/// [`PageTable::add_blocks`], so one table can absorb a whole paginated
/// result.
#[derive(Debug)]
pub struct PageTable {
    /// The document name stored in every record.
    document: String,

    /// Records in first-seen order.
    records: Vec<PageRecord>,

    /// Maps a page number to its index in `records`.
    index_by_page: HashMap<i64, usize>,
}

impl PageTable {
    /// Create an empty table for `document`.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            records: Vec::new(),
            index_by_page: HashMap::new(),
        }
    }

    /// Add one line of text to `page`, creating the page's record if needed.
    pub fn add_line(&mut self, page: i64, text: &str) {
        match self.index_by_page.get(&page) {
            Some(&idx) => {
                let content = &mut self.records[idx].content;
                content.push(' ');
                content.push_str(text);
            }
            None => {
                self.index_by_page.insert(page, self.records.len());
                self.records.push(PageRecord {
                    document: self.document.clone(),
                    page,
                    content: text.to_owned(),
                });
            }
        }
    }

    /// Add every `LINE` block in `blocks`. Other blocks are ignored.
    pub fn add_blocks(&mut self, blocks: &[DetectedBlock]) {
        for block in blocks {
            if let BlockKind::Other(kind) = &block.kind {
                trace!(%kind, page = block.page, "Skipping non-line block");
                continue;
            }
            self.add_line(block.page, &block.text);
        }
    }

    /// How many pages have we seen?
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Have we seen no pages at all?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the table, returning records in first-seen page order.
    pub fn into_records(self) -> Vec<PageRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page: i64, content: &str) -> PageRecord {
        PageRecord {
            document: "doc.pdf".to_owned(),
            page,
            content: content.to_owned(),
        }
    }

    #[test]
    fn lines_on_the_same_page_are_joined_with_spaces() {
        let mut table = PageTable::new("doc.pdf");
        table.add_blocks(&[
            DetectedBlock::line(1, "A"),
            DetectedBlock::line(1, "B"),
            DetectedBlock::line(2, "C"),
        ]);
        assert_eq!(table.into_records(), vec![record(1, "A B"), record(2, "C")]);
    }

    #[test]
    fn text_is_appended_across_batches() {
        let mut table = PageTable::new("doc.pdf");
        table.add_blocks(&[DetectedBlock::line(1, "A")]);
        table.add_blocks(&[DetectedBlock::line(1, "B"), DetectedBlock::line(2, "C")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.into_records(), vec![record(1, "A B"), record(2, "C")]);
    }

    #[test]
    fn pages_keep_first_seen_order() {
        let mut table = PageTable::new("doc.pdf");
        table.add_blocks(&[
            DetectedBlock::line(3, "x"),
            DetectedBlock::line(1, "y"),
            DetectedBlock::line(3, "z"),
        ]);
        table.add_blocks(&[DetectedBlock::line(2, "w"), DetectedBlock::line(1, "v")]);
        assert_eq!(
            table.into_records(),
            vec![record(3, "x z"), record(1, "y v"), record(2, "w")]
        );
    }

    #[test]
    fn non_line_blocks_are_ignored() {
        let mut table = PageTable::new("doc.pdf");
        table.add_blocks(&[
            DetectedBlock {
                kind: BlockKind::Other("PAGE".to_owned()),
                page: 1,
                text: String::new(),
            },
            DetectedBlock {
                kind: BlockKind::Other("WORD".to_owned()),
                page: 1,
                text: "A".to_owned(),
            },
            DetectedBlock::line(1, "A"),
        ]);
        assert_eq!(table.into_records(), vec![record(1, "A")]);
    }

    #[test]
    fn empty_table_has_no_records() {
        let table = PageTable::new("doc.pdf");
        assert!(table.is_empty());
        assert!(table.into_records().is_empty());
    }

    #[test]
    fn records_serialize_with_capitalized_field_names() {
        let json = serde_json::to_value(record(1, "A")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Document": "doc.pdf", "Page": 1, "Content": "A" })
        );
    }
}
