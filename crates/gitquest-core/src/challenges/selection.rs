//! Parsing of the `--challenges` argument.

use std::collections::BTreeSet;
use std::str::FromStr;

use super::Challenge;
use crate::error::QuestError;

/// An ordered, de-duplicated set of challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeSelection(BTreeSet<Challenge>);

impl ChallengeSelection {
    pub fn all() -> Self {
        Self(Challenge::ALL.into_iter().collect())
    }

    /// Parse `all` or a comma-separated list of ids such as `1, 3,5`.
    pub fn parse(input: &str) -> Result<Self, QuestError> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let mut set = BTreeSet::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let challenge = part
                .parse::<u8>()
                .ok()
                .and_then(Challenge::from_id)
                .ok_or_else(|| QuestError::UnknownChallenge(part.to_string()))?;
            set.insert(challenge);
        }
        if set.is_empty() {
            return Err(QuestError::EmptySelection);
        }
        Ok(Self(set))
    }

    /// Challenges in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = Challenge> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, challenge: Challenge) -> bool {
        self.0.contains(&challenge)
    }
}

impl Default for ChallengeSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for ChallengeSelection {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(selection: &ChallengeSelection) -> Vec<u8> {
        selection.iter().map(Challenge::id).collect()
    }

    #[test]
    fn all_selects_every_challenge() {
        let selection = ChallengeSelection::parse("all").unwrap();
        assert_eq!(ids(&selection), (1..=12).collect::<Vec<_>>());
        assert_eq!(ChallengeSelection::parse(" ALL ").unwrap(), selection);
    }

    #[test]
    fn list_is_trimmed_sorted_and_deduplicated() {
        let selection = ChallengeSelection::parse(" 5, 1 ,12,5 ").unwrap();
        assert_eq!(ids(&selection), vec![1, 5, 12]);
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(Challenge::Patch));
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        for input in ["0", "13", "1,13", "255", "256"] {
            let err = ChallengeSelection::parse(input).unwrap_err();
            assert!(matches!(err, QuestError::UnknownChallenge(_)), "{input}");
        }
    }

    #[test]
    fn non_numbers_are_rejected() {
        let err = ChallengeSelection::parse("1,two").unwrap_err();
        assert!(matches!(err, QuestError::UnknownChallenge(ref id) if id == "two"));
        assert!("-1".parse::<ChallengeSelection>().is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        for input in ["", " ", ",", " , ,"] {
            assert!(matches!(
                ChallengeSelection::parse(input),
                Err(QuestError::EmptySelection)
            ));
        }
    }
}
