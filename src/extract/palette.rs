use super::document::{self, FieldRule, Page, Read};
use super::rules;
use super::{BlockSkip, Extraction, Extractor};
use crate::config::PaletteSelectors;
use crate::records::PaletteRecord;
use crate::{ConfigResult, ExtractError, ExtractResult};
use scraper::{ElementRef, Selector};

/// Extracts colour-palette records from listing rows
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    item: Selector,
    favorites: FieldRule,
    swatch_container: Selector,
    swatch: Selector,
}

impl PaletteExtractor {
    pub fn new(selectors: &PaletteSelectors) -> ConfigResult<Self> {
        Ok(Self {
            item: document::compile(&selectors.item_selector)?,
            favorites: FieldRule::new(&selectors.favorites_selector, Read::Text)?,
            swatch_container: document::compile(&selectors.swatch_container_selector)?,
            swatch: document::compile(&selectors.swatch_selector)?,
        })
    }

    fn extract_block(&self, block: ElementRef<'_>) -> ExtractResult<PaletteRecord> {
        let raw = document::try_extract(block, &self.favorites)
            .ok_or(ExtractError::MissingField("favoriteNumber"))?;
        let favorite_number = rules::parse_grouped_number("favoriteNumber", &raw)?;

        let mut colors = Vec::new();
        if let Some(container) = document::select_first(block, &self.swatch_container) {
            for swatch in container.select(&self.swatch) {
                let Some(value) = document::style_property(swatch, "background-color") else {
                    continue;
                };
                let hex = rules::normalize_color(&value)?;
                if !hex.is_empty() {
                    colors.push(hex);
                }
            }
        }

        Ok(PaletteRecord {
            favorite_number,
            colors: rules::dedup_preserving_order(colors),
        })
    }
}

impl Extractor for PaletteExtractor {
    type Record = PaletteRecord;

    fn extract(&self, page: &Page) -> Extraction<PaletteRecord> {
        let mut extraction = Extraction::default();

        for (index, block) in page.select_all(&self.item).into_iter().enumerate() {
            match self.extract_block(block) {
                Ok(record) => extraction.records.push(record),
                Err(reason) => extraction.skipped.push(BlockSkip { index, reason }),
            }
        }

        extraction
    }
}
