//! Transaction categories and their display labels.

use std::{collections::HashMap, convert::Infallible, fmt, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category key stored on a transaction.
///
/// The built-in keys cover the categories offered by the entry form. Any other
/// key is kept verbatim in [`Category::Custom`] so that backups written by other
/// tools survive a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Bonus,
    Housing,
    Food,
    Transport,
    Health,
    Education,
    Leisure,
    Bills,
    Shopping,
    Other,
    Custom(String),
}

impl Category {
    pub const BUILT_IN: [Category; 13] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Bonus,
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Health,
        Category::Education,
        Category::Leisure,
        Category::Bills,
        Category::Shopping,
        Category::Other,
    ];

    /// Storage key, e.g. `salary`.
    pub fn key(&self) -> &str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Bonus => "bonus",
            Category::Housing => "housing",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Health => "health",
            Category::Education => "education",
            Category::Leisure => "leisure",
            Category::Bills => "bills",
            Category::Shopping => "shopping",
            Category::Other => "other",
            Category::Custom(key) => key,
        }
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        Category::BUILT_IN
            .iter()
            .find(|category| category.key() == key)
            .cloned()
            .unwrap_or_else(|| Category::Custom(key.to_string()))
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Category::from(key.as_str())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Category::from(key))
    }
}

static DEFAULT_LABELS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    [
        ("salary", "Salário"),
        ("freelance", "Freelance"),
        ("investment", "Investimentos"),
        ("bonus", "Bonificação"),
        ("housing", "Moradia"),
        ("food", "Alimentação"),
        ("transport", "Transporte"),
        ("health", "Saúde"),
        ("education", "Educação"),
        ("leisure", "Lazer"),
        ("bills", "Contas"),
        ("shopping", "Compras"),
        ("other", "Outros"),
    ]
    .into_iter()
    .map(|(key, label)| (key.to_string(), label.to_string()))
    .collect()
});

/// Lookup table from category keys to display labels.
///
/// Kept apart from [`Category`] so frontends can swap or extend the wording
/// without touching stored data. Keys without an entry display as themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabels {
    labels: HashMap<String, String>,
}

impl CategoryLabels {
    /// Creates an empty table; every category displays as its raw key.
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Adds or replaces the label for `key`.
    pub fn set(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }

    pub fn with_overrides<K, V>(mut self, overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, label) in overrides {
            self.set(key, label);
        }
        self
    }

    pub fn label<'a>(&'a self, category: &'a Category) -> &'a str {
        self.label_for_key(category.key())
    }

    pub fn label_for_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.clone(),
        }
    }
}
