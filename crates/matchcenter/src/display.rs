//! Terminal rendering of match records.
//!
//! Most terminals draw characters in logical order and never join Arabic
//! letters, so lines are reshaped into presentation forms and reordered into
//! visual order before printing.

use ar_reshaper::reshape_line;
use unicode_bidi::BidiInfo;

use crate::types::MatchRecord;

/// Reshapes Arabic letters into their joined forms and reorders `text` into
/// visual (left-to-right on screen) order.
pub fn shape_rtl(text: &str) -> String {
    let reshaped = reshape_line(text);
    let bidi_info = BidiInfo::new(&reshaped, None);
    if !bidi_info.has_rtl() {
        return reshaped;
    }

    bidi_info
        .paragraphs
        .iter()
        .map(|para| bidi_info.reorder_line(para, para.range.clone()))
        .collect()
}

pub fn display_line(record: &MatchRecord, shape: bool) -> String {
    let line = record.to_string();
    if shape { shape_rtl(&line) } else { line }
}

pub fn display_lines(records: &[MatchRecord], shape: bool) -> Vec<String> {
    records.iter().map(|r| display_line(r, shape)).collect()
}
