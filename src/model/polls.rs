//! Poll discovery and vote reconciliation.
//!
//! A poll definition and its tallies arrive separately: the definition lives
//! in a post's content, the tallies come from the results endpoint keyed by
//! answer `client_id`. These functions join the two without touching either.

use super::block::Block;
use super::blocks::PollBlock;
use crate::types::{AnswerId, PollId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Vote counts keyed by answer id, as returned by the results endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollResults(IndexMap<String, u64>);

impl PollResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn votes_for(&self, option_id: &str) -> Option<u64> {
        self.0.get(option_id).copied()
    }

    pub fn insert(&mut self, option_id: impl Into<String>, votes: u64) {
        self.0.insert(option_id.into(), votes);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for PollResults {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One poll answer together with its tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerTally {
    #[serde(rename = "answer_text")]
    pub text: String,
    #[serde(rename = "client_id")]
    pub option_id: AnswerId,
    pub votes: u64,
}

/// A poll definition joined with its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedPoll {
    pub question: String,
    #[serde(rename = "client_id")]
    pub poll_id: PollId,
    #[serde(rename = "answers")]
    pub options: Vec<AnswerTally>,
    #[serde(serialize_with = "as_seconds")]
    pub expire_after: Duration,
    pub total_votes: u64,
}

fn as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

/// Poll blocks in `blocks`, in content order.
///
/// Posts normally hold one poll, but reblog layering can produce several;
/// all of them are returned, without deduplication. The iterator is cheap to
/// clone, and calling this again on the same slice starts over.
pub fn find_polls(blocks: &[Block]) -> impl Iterator<Item = &PollBlock> + Clone + '_ {
    blocks.iter().filter_map(Block::as_poll)
}

/// Attach vote counts to each option of `poll`, keeping option order.
///
/// Options absent from `results` count as zero votes; a poll nobody has
/// voted on yet has no entries at all. `total_votes` sums the per-option
/// counts, so tallies for ids the poll does not know are ignored. The total
/// saturates at `u64::MAX`.
pub fn zip_poll_with_results(poll: &PollBlock, results: &PollResults) -> EnrichedPoll {
    let options: Vec<AnswerTally> = poll
        .options
        .iter()
        .map(|option| AnswerTally {
            text: option.text.clone(),
            option_id: option.option_id.clone(),
            votes: results.votes_for(option.option_id.as_str()).unwrap_or(0),
        })
        .collect();

    let total_votes = options
        .iter()
        .fold(0u64, |total, tally| total.saturating_add(tally.votes));

    let known = |id: &str| poll.option_ids().any(|option_id| option_id.as_str() == id);
    if results.0.keys().any(|id| !known(id)) {
        log::debug!(
            "Poll {} results mention answers outside the poll definition",
            poll.poll_id
        );
    }

    EnrichedPoll {
        question: poll.question.clone(),
        poll_id: poll.poll_id.clone(),
        options,
        expire_after: poll.expire_after,
        total_votes,
    }
}
