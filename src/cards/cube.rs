use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{
    cards::{Colour, CubeCard, CubeList, Rarity},
    Res,
};

/// Convert one cube list record to a card. Record fields are name, converted
/// cost, type line, colour code, set, collector number, rarity and colour
/// category. Records with fewer than seven fields carry no rarity and are
/// skipped.
fn record_to_card(record: &csv::StringRecord) -> Option<CubeCard> {
    if record.len() < 7 {
        return None;
    }

    Some(CubeCard {
        name: record.get(0)?.to_string(),
        cmc: record.get(1).and_then(|v| v.parse().ok()).unwrap_or(0),
        type_line: record.get(2).unwrap_or("").to_string(),
        colour: Colour::from_code(record.get(3).unwrap_or("")),
        rarity: Rarity::from_name(record.get(6).unwrap_or("")),
        set: record.get(4).unwrap_or("").to_string(),
        collector_number: record.get(5).unwrap_or("").to_string(),
        colour_category: record.get(7).unwrap_or("").to_string(),
    })
}

/// Parse a raw cube list. The first line is a header. Quoted fields may embed
/// the delimiter. Unparseable records are skipped, not fatal.
fn parse_cube(raw: &[u8]) -> Vec<CubeCard> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw);

    let mut cards = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => {
                if let Some(card) = record_to_card(&record) {
                    cards.push(card);
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable cube list record: {e}"),
        }
    }
    cards
}

async fn read_cube(path: &Path) -> Res<Vec<CubeCard>> {
    tracing::debug!("Loading cube list from {}.", path.display());
    let raw = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
    Ok(parse_cube(&raw))
}

/// Loads and caches the cube list. The cache is populated at most once and
/// concurrent callers during the load window share the in-flight read. A
/// failed load is reported as an empty cube, left uncached so the next call
/// retries.
pub struct CubeLoader {
    path: PathBuf,
    cache: Mutex<Option<Arc<CubeList>>>,
}

impl CubeLoader {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    pub async fn load(&self) -> Arc<CubeList> {
        let mut cache = self.cache.lock().await;
        self.populate(&mut cache).await
    }

    /// Drop the cached list and read it again from disk.
    pub async fn reload(&self) -> Arc<CubeList> {
        let mut cache = self.cache.lock().await;
        *cache = None;
        self.populate(&mut cache).await
    }

    async fn populate(&self, cache: &mut Option<Arc<CubeList>>) -> Arc<CubeList> {
        if let Some(cube) = cache.as_ref() {
            return Arc::clone(cube);
        }

        match read_cube(&self.path).await {
            Ok(cards) => {
                let cube = Arc::new(CubeList::new(cards));
                tracing::debug!("Cached cube list with {} cards.", cube.size());
                *cache = Some(Arc::clone(&cube));
                cube
            }
            Err(e) => {
                tracing::error!("Failed to load cube list from {}: {e}", self.path.display());
                Arc::new(CubeList::new(Vec::new()))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CUBE_CSV: &str = "name,CMC,Type,Color,Set,Collector Number,Rarity,Color Category\n\
        \"Sword, Sworn Companion\",3,Artifact,,SET,001,rare,Colorless\n\
        Lightning Strike,1,Instant,R,TST,002,Common,Red\n\
        Azorius Charm,2,Instant,WU,TST,003,uncommon,Multicolour\n\
        Shattered Angel,x,Creature,X,TST,004,Promo,White\n\
        Broken Line,2,Sorcery\n\
        Last Word,4,Instant,U,TST,005,Mythic,Blue\n";

    #[test]
    fn test_quoted_name_keeps_embedded_comma() {
        let cards = parse_cube(CUBE_CSV.as_bytes());
        assert_eq!(cards[0].name, "Sword, Sworn Companion");
        assert_eq!(cards[0].colour, Colour::Colourless);
        assert_eq!(cards[0].rarity, Rarity::Rare);
    }

    #[test]
    fn test_short_records_skipped() {
        let cards = parse_cube(CUBE_CSV.as_bytes());
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|card| card.name != "Broken Line"));
    }

    #[test]
    fn test_colour_and_rarity_mapping() {
        let cards = parse_cube(CUBE_CSV.as_bytes());
        assert_eq!(cards[1].colour, Colour::Red);
        assert_eq!(cards[1].rarity, Rarity::Common);
        assert_eq!(cards[2].colour, Colour::Multicolour);
        assert_eq!(cards[4].rarity, Rarity::Mythic);

        // Unknown codes degrade instead of failing the row.
        assert_eq!(cards[3].colour, Colour::Colourless);
        assert_eq!(cards[3].rarity, Rarity::Common);
        assert_eq!(cards[3].cmc, 0);
    }

    #[tokio::test]
    async fn test_loader_caches_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.csv");
        std::fs::write(&path, CUBE_CSV).unwrap();

        let loader = CubeLoader::new(path.clone());
        let first = loader.load().await;
        assert_eq!(first.size(), 5);

        // A rewritten file is not picked up until an explicit reload.
        std::fs::write(&path, "name,CMC,Type,Color,Set,Collector Number,Rarity\n").unwrap();
        let second = loader.load().await;
        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = loader.reload().await;
        assert_eq!(reloaded.size(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty_cube() {
        let loader = CubeLoader::new(PathBuf::from("/nonexistent/cube.csv"));
        let cube = loader.load().await;
        assert!(cube.is_empty());

        // The failure is not cached, so a later load retries the read.
        let retry = loader.load().await;
        assert!(retry.is_empty());
    }
}
