/*!
 * Owner Palette
 * Cosmetic color assignment, keyed by first-seen owner order
 */

use crate::core::limits::OWNER_PALETTE;
use crate::core::types::ColorToken;
use ahash::RandomState;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub(super) struct OwnerPalette {
    colors: HashMap<String, ColorToken, RandomState>,
    next_index: usize,
}

impl OwnerPalette {
    /// Color for `owner`, assigning the next palette entry on first sight
    pub fn assign(&mut self, owner: &str) -> ColorToken {
        if let Some(&color) = self.colors.get(owner) {
            return color;
        }
        let color = OWNER_PALETTE[self.next_index % OWNER_PALETTE.len()];
        self.next_index += 1;
        self.colors.insert(owner.to_string(), color);
        color
    }

    pub fn get(&self, owner: &str) -> Option<ColorToken> {
        self.colors.get(owner).copied()
    }
}
