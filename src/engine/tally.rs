//! Vote tallying and the expulsion policy.
//!
//! A vote expels the seat with strictly more votes than every other seat.
//! Any shared maximum is a tie and nobody is expelled; with three seats
//! that covers both the 1/1/1 split and nothing-counted edge cases.

use crate::core::{PlayerId, PlayerMap, Roster};

/// Received-vote counts per seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    counts: PlayerMap<usize>,
}

/// What the votes decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TallyOutcome {
    /// A unique maximum: this seat is expelled.
    Expelled(PlayerId),
    /// The maximum was shared. Nobody leaves the table.
    Tied,
}

impl Tally {
    /// Count the votes currently recorded on the roster.
    #[must_use]
    pub fn of(roster: &Roster) -> Self {
        let mut counts = PlayerMap::with_default(roster.player_count());
        for player in roster.iter() {
            if let Some(target) = player.vote_cast {
                counts[target] += 1;
            }
        }
        Self { counts }
    }

    /// Votes received by one seat.
    #[must_use]
    pub fn count(&self, id: PlayerId) -> usize {
        self.counts[id]
    }

    /// Iterate (seat, votes received) in table order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.counts.iter().map(|(id, &c)| (id, c))
    }

    /// Apply the strict-maximum policy.
    #[must_use]
    pub fn outcome(&self) -> TallyOutcome {
        let max = self.counts.iter().map(|(_, &c)| c).max().unwrap_or(0);
        if max == 0 {
            return TallyOutcome::Tied;
        }

        let mut leaders = self.counts.iter().filter(|(_, &c)| c == max);
        match (leaders.next(), leaders.next()) {
            (Some((id, _)), None) => TallyOutcome::Expelled(id),
            _ => TallyOutcome::Tied,
        }
    }
}
