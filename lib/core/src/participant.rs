use serde::{Deserialize, Serialize};
use crate::{Error, InterestVector, Result, Vocabulary};

/// Minimum number of interests a registrant must pick
pub const MIN_INTERESTS: usize = 3;
/// Maximum number of interests a registrant may pick
pub const MAX_INTERESTS: usize = 5;

/// A registered attendee
///
/// Email is the identity. The interest vector is fixed once registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub interests: InterestVector,
}

impl Participant {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, interests: InterestVector) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            interests,
        }
    }
}

/// Registration form input, checked before it reaches the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
}

impl Registration {
    pub fn new(name: impl Into<String>, email: impl Into<String>, interests: Vec<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            interests,
        }
    }

    /// Validate the form and encode it against `vocabulary`
    ///
    /// Does not check email uniqueness; that is the store's job.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<Participant> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if email.is_empty() {
            return Err(Error::MissingField("email"));
        }

        let count = self.interests.len();
        if !(MIN_INTERESTS..=MAX_INTERESTS).contains(&count) {
            return Err(Error::InterestCount {
                min: MIN_INTERESTS,
                max: MAX_INTERESTS,
                actual: count,
            });
        }

        let interests = vocabulary.encode(&self.interests)?;
        Ok(Participant::new(name, email, interests))
    }
}
