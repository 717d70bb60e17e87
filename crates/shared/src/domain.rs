use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! tag_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

tag_newtype!(BudgetTag);
tag_newtype!(InterestTag);

/// Separator used when the interest list is sent as a single string.
pub const INTEREST_SEPARATOR: &str = ", ";

/// Interest tags in first-insertion order. Values are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestList {
    tags: Vec<InterestTag>,
}

impl InterestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims `raw` and appends it. Returns `false` when the trimmed value is
    /// empty or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.tags.push(InterestTag::new(value));
        true
    }

    /// Removes the tag equal to `value`. Returns `false` when nothing matched.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| tag.as_str() != value);
        self.tags.len() != before
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|tag| tag.as_str() == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterestTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn joined(&self) -> String {
        self.tags
            .iter()
            .map(InterestTag::as_str)
            .collect::<Vec<_>>()
            .join(INTEREST_SEPARATOR)
    }
}

impl<'a> FromIterator<&'a str> for InterestList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.insert(value);
        }
        list
    }
}

/// Page-session selection made through explicit user interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_budget: Option<BudgetTag>,
    pub interests: InterestList,
}

impl SelectionState {
    /// The budget as sent on the wire: empty until a tier is chosen.
    pub fn budget_or_empty(&self) -> &str {
        self.selected_budget
            .as_ref()
            .map(BudgetTag::as_str)
            .unwrap_or_default()
    }
}
