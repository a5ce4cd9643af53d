//! Vocabulary tables
//!
//! Keyword tables that map free text onto part categories and material
//! ranks. Both tables are plain data: adding a keyword never requires
//! touching the matching code. Rules are tried in table order and the
//! first keyword found (case-insensitive substring) wins.

use partsort_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Part category, declared in label sort priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Screw,
    Bolt,
    ThreadedRod,
    Nut,
    Washer,
    Pin,
    Insert,
    Standoff,
    Spacer,
    Other,
}

impl Category {
    /// Every category in sort priority
    pub const ALL: [Category; 10] = [
        Category::Screw,
        Category::Bolt,
        Category::ThreadedRod,
        Category::Nut,
        Category::Washer,
        Category::Pin,
        Category::Insert,
        Category::Standoff,
        Category::Spacer,
        Category::Other,
    ];

    /// Position in sort priority
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Screw => "screw",
            Category::Bolt => "bolt",
            Category::ThreadedRod => "threaded_rod",
            Category::Nut => "nut",
            Category::Washer => "washer",
            Category::Pin => "pin",
            Category::Insert => "insert",
            Category::Standoff => "standoff",
            Category::Spacer => "spacer",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Material ordinal; lower is the better (more corrosion resistant) grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRank(pub u16);

impl MaterialRank {
    /// Rank of a part whose material could not be identified
    pub const UNSPECIFIED: MaterialRank = MaterialRank(99);

    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_specified(self) -> bool {
        self != Self::UNSPECIFIED
    }
}

/// Keyword precedence for category inference.
///
/// Precedence differs from sort priority: washers and nuts are tried
/// before screws because their descriptions routinely name the screw
/// size they fit ("Washer for 1/4" Screw Size").
const DEFAULT_CATEGORY_RULES: &[(&str, Category)] = &[
    ("lock washer", Category::Washer),
    ("split washer", Category::Washer),
    ("washer", Category::Washer),
    ("locknut", Category::Nut),
    ("lock nut", Category::Nut),
    ("hex nut", Category::Nut),
    ("nut", Category::Nut),
    ("helical insert", Category::Insert),
    ("insert", Category::Insert),
    ("standoff", Category::Standoff),
    ("spacer", Category::Spacer),
    ("u-bolt", Category::Bolt),
    ("carriage bolt", Category::Bolt),
    ("bolt", Category::Bolt),
    ("threaded rod", Category::ThreadedRod),
    ("threaded stud", Category::ThreadedRod),
    ("stud", Category::ThreadedRod),
    ("socket head", Category::Screw),
    ("button head", Category::Screw),
    ("flat head", Category::Screw),
    ("pan head", Category::Screw),
    ("set screw", Category::Screw),
    ("thumb screw", Category::Screw),
    ("screw", Category::Screw),
    ("dowel pin", Category::Pin),
    ("clevis pin", Category::Pin),
    ("cotter pin", Category::Pin),
    ("pin", Category::Pin),
];

/// Material grades, most specific first
const DEFAULT_MATERIAL_RULES: &[(&str, u16)] = &[
    ("316", 0),
    ("super-corrosion-resistant", 0),
    ("18-8", 1),
    ("303", 2),
    ("304", 2),
    ("17-4", 3),
    ("17-7", 3),
    ("410", 4),
    ("440c", 4),
    ("stainless", 5),
    ("brass", 10),
    ("bronze", 11),
    ("aluminum", 15),
    ("zinc", 20),
    ("galvanized", 21),
    ("grade 8", 25),
    ("alloy steel", 25),
    ("steel", 30),
    ("nylon", 40),
    ("plastic", 41),
    ("rubber", 45),
    ("ptfe", 46),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialRule {
    pub keyword: String,
    pub rank: MaterialRank,
}

/// Category and material keyword tables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vocabulary {
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub materials: Vec<MaterialRule>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORY_RULES
                .iter()
                .map(|(keyword, category)| CategoryRule {
                    keyword: (*keyword).to_string(),
                    category: *category,
                })
                .collect(),
            materials: DEFAULT_MATERIAL_RULES
                .iter()
                .map(|(keyword, rank)| MaterialRule {
                    keyword: (*keyword).to_string(),
                    rank: MaterialRank(*rank),
                })
                .collect(),
        }
    }
}

impl Vocabulary {
    /// An empty vocabulary: every part is `Other` with an unspecified material
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Add a category keyword with highest precedence
    #[must_use]
    pub fn with_category_keyword(mut self, keyword: &str, category: Category) -> Self {
        self.categories.insert(
            0,
            CategoryRule {
                keyword: keyword.to_lowercase(),
                category,
            },
        );
        self
    }

    /// Add a material keyword with highest precedence
    #[must_use]
    pub fn with_material(mut self, keyword: &str, rank: u16) -> Self {
        self.materials.insert(
            0,
            MaterialRule {
                keyword: keyword.to_lowercase(),
                rank: MaterialRank(rank),
            },
        );
        self
    }

    /// Validate the tables and lower-case every keyword
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        for rule in &mut self.categories {
            if rule.keyword.trim().is_empty() {
                return Err(Error::invalid_parameter("vocabulary", "empty category keyword"));
            }
            rule.keyword = rule.keyword.to_lowercase();
        }
        for rule in &mut self.materials {
            if rule.keyword.trim().is_empty() {
                return Err(Error::invalid_parameter("vocabulary", "empty material keyword"));
            }
            if rule.rank >= MaterialRank::UNSPECIFIED {
                return Err(Error::invalid_parameter(
                    "vocabulary",
                    format!(
                        "material '{}' rank {} must be below {}",
                        rule.keyword,
                        rule.rank.value(),
                        MaterialRank::UNSPECIFIED.value()
                    ),
                ));
            }
            rule.keyword = rule.keyword.to_lowercase();
        }
        Ok(())
    }

    /// First category whose keyword occurs in `text`
    pub fn categorize(&self, text: &str) -> Option<Category> {
        let text = text.to_lowercase();
        self.categories
            .iter()
            .find(|rule| text.contains(rule.keyword.as_str()))
            .map(|rule| rule.category)
    }

    /// Rank of the first material keyword occurring in `text`
    pub fn material_rank(&self, text: &str) -> MaterialRank {
        let text = text.to_lowercase();
        self.materials
            .iter()
            .find(|rule| text.contains(rule.keyword.as_str()))
            .map(|rule| rule.rank)
            .unwrap_or(MaterialRank::UNSPECIFIED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sort_priority() {
        assert!(Category::Screw < Category::Nut);
        assert!(Category::Nut < Category::Washer);
        assert!(Category::Washer < Category::Other);
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_categorize_keywords() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.categorize("Socket Head Screw"), Some(Category::Screw));
        assert_eq!(vocab.categorize("HEX NUT"), Some(Category::Nut));
        assert_eq!(vocab.categorize("Nylon-Insert Locknut"), Some(Category::Nut));
        assert_eq!(vocab.categorize("Washer for 1/4\" Screw Size"), Some(Category::Washer));
        assert_eq!(vocab.categorize("Shoulder Bolt"), Some(Category::Bolt));
        assert_eq!(vocab.categorize("Fully Threaded Rod"), Some(Category::ThreadedRod));
        assert_eq!(vocab.categorize("Dowel Pin"), Some(Category::Pin));
        assert_eq!(vocab.categorize("Hose Clamp"), None);
    }

    #[test]
    fn test_material_ranks() {
        let vocab = Vocabulary::default();
        let r316 = vocab.material_rank("316 Stainless Steel");
        let r188 = vocab.material_rank("18-8 Stainless Steel");
        let zinc = vocab.material_rank("Zinc-Plated Steel");
        let none = vocab.material_rank("Hose Clamp");
        assert_eq!(r316, MaterialRank(0));
        assert!(r316 < r188);
        assert!(r188 < zinc);
        assert!(zinc < none);
        assert_eq!(none, MaterialRank::UNSPECIFIED);
        assert!(!none.is_specified());
    }

    #[test]
    fn test_vocabulary_is_additive() {
        let vocab = Vocabulary::default()
            .with_category_keyword("Rivet", Category::Pin)
            .with_material("Titanium", 3);
        assert_eq!(vocab.categorize("Blind Rivet"), Some(Category::Pin));
        assert_eq!(vocab.material_rank("titanium screw"), MaterialRank(3));
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let mut vocab = Vocabulary::empty().with_material("unobtainium", 120);
        assert!(matches!(vocab.validate_and_normalize(), Err(Error::InvalidParameter { .. })));

        let mut vocab = Vocabulary::empty().with_category_keyword("  ", Category::Nut);
        assert!(matches!(vocab.validate_and_normalize(), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_validate_lowercases() {
        let mut vocab = Vocabulary::empty();
        vocab.categories.push(CategoryRule {
            keyword: "WING NUT".to_string(),
            category: Category::Nut,
        });
        vocab.validate_and_normalize().unwrap();
        assert_eq!(vocab.categories[0].keyword, "wing nut");
    }

    #[test]
    fn test_serde_roundtrip() {
        let vocab = Vocabulary::default();
        let json = serde_json::to_string(&vocab).unwrap();
        let parsed: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(vocab, parsed);
        assert!(json.contains("\"threaded_rod\""));
    }
}
