//! Block splitting and sigil classification

use super::types::{PartKind, TextPart};

/// Literal separator between blocks
pub const BLOCK_DELIMITER: &str = "+++";

/// Prefix table, longest marker first. `***` starts with `**` which starts
/// with `*`, so the order decides the kind.
const PREFIXES: [PartKind; 4] = [
    PartKind::Title,
    PartKind::Subtitle,
    PartKind::Bold,
    PartKind::BulletPoint,
];

/// Parse an article body into ordered text parts.
///
/// Marked blocks lose every occurrence of their marker, not only the
/// leading one, so a bullet such as `- a-b` becomes `ab`.
pub fn parse(text: &str) -> Vec<TextPart> {
    text.split(BLOCK_DELIMITER)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(classify)
        .collect()
}

fn classify(block: &str) -> TextPart {
    for kind in PREFIXES {
        let Some(marker) = kind.marker() else {
            continue;
        };
        if block.starts_with(marker) {
            let content = block.replace(marker, "");
            return TextPart::new(content.trim(), kind);
        }
    }

    TextPart::new(block, PartKind::RegularText)
}
