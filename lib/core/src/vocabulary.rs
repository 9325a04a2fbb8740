use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use crate::{Error, InterestVector, Result};

/// Interest labels offered on the registration form, in column order.
pub const DEFAULT_INTERESTS: [&str; 12] = [
    "Startups",
    "Mercados y bolsa",
    "Capital de riesgo",
    "Blockchain y cripto",
    "IA en Finanzas",
    "Inversión en bienes raíces",
    "Fintech",
    "Criptomonedas",
    "Growth Hacking",
    "Fondos de Inversión",
    "Networking de inversores",
    "Inversiones sostenibles",
];

/// Fixed, ordered set of interest labels
///
/// Defines the dimension of every [`InterestVector`]. The same vocabulary
/// must be used to write registrations and to partition them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    labels: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::InvalidConfig("vocabulary cannot be empty".to_string()));
        }

        let mut index = AHashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("vocabulary label {} is blank", i)));
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(Error::InvalidConfig(format!("duplicate vocabulary label: {}", label)));
            }
        }

        Ok(Self { labels, index })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[inline]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Labels whose bit is set in `vector`, in vocabulary order
    pub fn selected_labels<'a>(&'a self, vector: &'a InterestVector) -> impl Iterator<Item = &'a str> + 'a {
        vector.selected().filter_map(move |i| self.label(i))
    }

    /// Build a vector from label names
    pub fn encode<S: AsRef<str>>(&self, selected: &[S]) -> Result<InterestVector> {
        let mut bits = vec![false; self.len()];
        for label in selected {
            let label = label.as_ref().trim();
            let i = self
                .index_of(label)
                .ok_or_else(|| Error::UnknownInterest(label.to_string()))?;
            if bits[i] {
                return Err(Error::DuplicateInterest(label.to_string()));
            }
            bits[i] = true;
        }
        Ok(InterestVector::new(bits))
    }

    /// Check that `columns` lists exactly this vocabulary, in order
    pub fn check_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<()> {
        for (column, expected) in self.labels.iter().enumerate() {
            let found = columns.get(column).map(|c| c.as_ref()).unwrap_or("");
            if found != expected {
                return Err(Error::VocabularyMismatch {
                    column,
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }
        if columns.len() > self.labels.len() {
            return Err(Error::VocabularyMismatch {
                column: self.labels.len(),
                expected: String::new(),
                found: columns[self.labels.len()].as_ref().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let labels: Vec<String> = DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect();
        let index = labels.iter().cloned().enumerate().map(|(i, l)| (l, i)).collect();
        Self { labels, index }
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Vocabulary {}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = Error;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Vocabulary::new(labels)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.labels
    }
}
