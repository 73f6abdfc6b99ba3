//! Grouping extracted records into the shape the map layer consumes:
//! block identifier → booth numbers to highlight.

use std::collections::BTreeMap;

use comiket_types::LocationRecord;

/// Group records by block letter, collecting their numeric booth numbers.
///
/// Only records with both a block and a space contribute. The block key is
/// kept exactly as extracted (hiragana stays hiragana); callers that need
/// the canonical katakana key fold it via `blockmap::get_block_info`.
pub fn booths_by_block(records: &[LocationRecord]) -> BTreeMap<String, Vec<u32>> {
    let mut result: BTreeMap<String, Vec<u32>> = BTreeMap::new();

    for record in records {
        let (Some(block), Some(space)) = (&record.block, &record.space) else {
            continue;
        };
        let digits: String = space.chars().filter(|c| c.is_ascii_digit()).collect();
        if let Ok(booth) = digits.parse::<u32>() {
            result.entry(block.clone()).or_default().push(booth);
        }
    }

    result
}
