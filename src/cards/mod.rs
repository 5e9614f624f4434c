use serde::{Deserialize, Serialize};

pub mod cube;
pub mod stats;

/// Card colours: the five pigment colours plus the two catch-all buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White,
    Blue,
    Black,
    Red,
    Green,
    Multicolour,
    Colourless,
}

impl Colour {
    pub const ALL: [Colour; 7] = [
        Colour::White,
        Colour::Blue,
        Colour::Black,
        Colour::Red,
        Colour::Green,
        Colour::Multicolour,
        Colour::Colourless,
    ];

    /// Map a cube list colour code to a colour. Single letters are the five
    /// pigment colours, an empty or `C` code is colourless and any longer
    /// letter combination counts as multicolour.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "" | "C" | "c" => Colour::Colourless,
            code if code.len() >= 2 => Colour::Multicolour,
            "W" | "w" => Colour::White,
            "U" | "u" => Colour::Blue,
            "B" | "b" => Colour::Black,
            "R" | "r" => Colour::Red,
            "G" | "g" => Colour::Green,
            _ => Colour::Colourless,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "white",
            Colour::Blue => "blue",
            Colour::Black => "black",
            Colour::Red => "red",
            Colour::Green => "green",
            Colour::Multicolour => "multicolour",
            Colour::Colourless => "colourless",
        }
    }

    /// One of the five single-colour pigments, as opposed to the
    /// multicolour and colourless buckets.
    pub fn is_pigment(self) -> bool {
        !matches!(self, Colour::Multicolour | Colour::Colourless)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Card rarities, ordered from most common to most scarce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Mythic, Rarity::Rare, Rarity::Uncommon, Rarity::Common];

    /// Case-insensitive; unrecognised names read as common.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mythic" => Rarity::Mythic,
            "rare" => Rarity::Rare,
            "uncommon" => Rarity::Uncommon,
            _ => Rarity::Common,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Mythic => "mythic",
            Rarity::Rare => "rare",
            Rarity::Uncommon => "uncommon",
            Rarity::Common => "common",
        }
    }
}

/// Running per-colour tally within a single booster.
#[derive(Debug, Default)]
pub struct ColourCounts([u32; 7]);

impl ColourCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, colour: Colour) -> u32 {
        self.0[colour.index()]
    }

    pub fn increment(&mut self, colour: Colour) {
        self.0[colour.index()] += 1;
    }
}

/// A named card from the cube list.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeCard {
    pub name: String,
    pub cmc: u32,
    pub type_line: String,
    pub colour: Colour,
    pub rarity: Rarity,
    pub set: String,
    pub collector_number: String,
    pub colour_category: String,
}

impl CubeCard {
    #[cfg(test)]
    pub fn sample(colour: Colour, rarity: Rarity) -> Self {
        static ID: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(1);

        let id = ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            name: format!("Card {id}"),
            cmc: (id % 7) as u32,
            type_line: "Creature".to_string(),
            colour,
            rarity,
            set: "TST".to_string(),
            collector_number: format!("{id:03}"),
            colour_category: colour.name().to_string(),
        }
    }
}

/// The fixed card pool a draft deals from. Read-only once loaded.
#[derive(Debug)]
pub struct CubeList {
    cards: Vec<CubeCard>,
}

impl CubeList {
    pub fn new(cards: Vec<CubeCard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CubeCard] {
        &self.cards
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Substring search across name, type line, colour category and set.
    /// Name-prefix matches sort first, then alphabetical by name.
    pub fn search(&self, query: &str) -> Vec<&CubeCard> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<&CubeCard> = self
            .cards
            .iter()
            .filter(|card| {
                card.name.to_lowercase().contains(&term)
                    || card.type_line.to_lowercase().contains(&term)
                    || card.colour_category.to_lowercase().contains(&term)
                    || card.set.to_lowercase().contains(&term)
            })
            .collect();
        hits.sort_by(|a, b| {
            let a_prefix = a.name.to_lowercase().starts_with(&term);
            let b_prefix = b.name.to_lowercase().starts_with(&term);
            b_prefix.cmp(&a_prefix).then_with(|| a.name.cmp(&b.name))
        });
        hits
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_colour_from_code() {
        assert_eq!(Colour::from_code("W"), Colour::White);
        assert_eq!(Colour::from_code("u"), Colour::Blue);
        assert_eq!(Colour::from_code(""), Colour::Colourless);
        assert_eq!(Colour::from_code("C"), Colour::Colourless);
        // Any combination of two or more letters is multicolour.
        assert_eq!(Colour::from_code("WU"), Colour::Multicolour);
        assert_eq!(Colour::from_code("WUBRG"), Colour::Multicolour);
        // An unrecognised single letter degrades to colourless.
        assert_eq!(Colour::from_code("X"), Colour::Colourless);
    }

    #[test]
    fn test_rarity_from_name() {
        assert_eq!(Rarity::from_name("Mythic"), Rarity::Mythic);
        assert_eq!(Rarity::from_name("RARE"), Rarity::Rare);
        assert_eq!(Rarity::from_name("uncommon"), Rarity::Uncommon);
        assert_eq!(Rarity::from_name("promo"), Rarity::Common);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Mythic);
    }

    #[test]
    fn test_search_prefers_name_prefix() {
        let cube = CubeList::new(vec![
            CubeCard {
                name: "Stormwing Entity".to_string(),
                cmc: 5,
                type_line: "Creature".to_string(),
                colour: Colour::Blue,
                rarity: Rarity::Rare,
                set: "M21".to_string(),
                collector_number: "63".to_string(),
                colour_category: "Blue".to_string(),
            },
            CubeCard {
                name: "Brainstorm".to_string(),
                cmc: 1,
                type_line: "Instant".to_string(),
                colour: Colour::Blue,
                rarity: Rarity::Common,
                set: "ICE".to_string(),
                collector_number: "61".to_string(),
                colour_category: "Blue".to_string(),
            },
        ]);

        let hits = cube.search("storm");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Stormwing Entity");

        assert!(cube.search("  ").is_empty());
        // Matches in non-name fields count too.
        assert_eq!(cube.search("instant").len(), 1);
    }
}
