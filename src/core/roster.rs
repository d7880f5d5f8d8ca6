//! Seats, roles, and the table roster.
//!
//! ## Role
//!
//! Every game has exactly one `Impostor`; everyone else is `Innocent`.
//! `Role` doubles as the winning side of a finished game.
//!
//! ## Roster
//!
//! Ordered seat list built from [`GameConfig`]. Holds per-seat identity
//! (name, human flag, persona) alongside per-game state (role, vote).
//! Seat order never changes; turn rotation and vote tallies index into it
//! by [`PlayerId`].

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::{GameConfig, PlayerId, PlayerMap};

/// The two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Knows the secret word; wins by expelling the impostor.
    Innocent,
    /// Never shown the word; wins by surviving the vote.
    Impostor,
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Fixed seat identity.
    pub id: PlayerId,

    /// Display name, renameable at any time.
    pub name: String,

    /// Is this the human seat?
    pub human: bool,

    /// Optional prompt-flavor blurb for AI seats.
    pub persona: Option<String>,

    /// Assigned at game start; `None` in the lobby.
    pub role: Option<Role>,

    /// Who this seat voted for. Set at most once per voting phase.
    pub vote_cast: Option<PlayerId>,
}

impl Player {
    /// Whether this seat holds the impostor role right now.
    #[must_use]
    pub fn is_impostor(&self) -> bool {
        self.role == Some(Role::Impostor)
    }
}

/// Ordered seat list with per-seat game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: PlayerMap<Player>,
    human: PlayerId,
}

impl Roster {
    /// Build the roster from a validated configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let seats = &config.seats;
        let players = PlayerMap::new(seats.len(), |id| {
            let seat = &seats[id.index()];
            Player {
                id,
                name: seat.name.clone(),
                human: seat.human,
                persona: seat.persona.clone(),
                role: None,
                vote_cast: None,
            }
        });
        // GameConfig guarantees exactly one human seat.
        let human = players
            .iter()
            .find(|(_, p)| p.human)
            .map(|(id, _)| id)
            .unwrap_or(PlayerId::new(0));

        Self { players, human }
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Whether `id` is a seat at this table.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(id)
    }

    /// Look up a seat. Panics on an out-of-range id; gate with
    /// [`Roster::contains`] when the id comes from outside.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> &Player {
        self.players.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> &mut Player {
        self.players.get_mut(id)
    }

    /// Iterate seats in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    /// Iterate the AI seats in table order.
    pub fn ai_players(&self) -> impl Iterator<Item = &Player> {
        self.iter().filter(|p| !p.human)
    }

    /// All seat ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// The human seat's id.
    #[must_use]
    pub fn human_seat(&self) -> PlayerId {
        self.human
    }

    /// The human seat.
    #[must_use]
    pub fn human(&self) -> &Player {
        self.players.get(self.human)
    }

    /// The seat currently holding the impostor role, if roles are assigned.
    #[must_use]
    pub fn impostor(&self) -> Option<&Player> {
        self.iter().find(|p| p.is_impostor())
    }

    /// Whether every seat has voted.
    #[must_use]
    pub fn all_votes_in(&self) -> bool {
        self.iter().all(|p| p.vote_cast.is_some())
    }

    /// Assign `impostor` its role, everyone else innocent. Clears votes.
    pub(crate) fn assign_roles(&mut self, impostor: PlayerId) {
        for (id, player) in self.players.iter_mut() {
            player.role = Some(if id == impostor {
                Role::Impostor
            } else {
                Role::Innocent
            });
            player.vote_cast = None;
        }
    }

    /// Back to lobby state: no roles, no votes. Names persist.
    pub(crate) fn clear_roles(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.role = None;
            player.vote_cast = None;
        }
    }

    /// Rename seats in table order; surplus names are ignored and seats
    /// beyond the given names keep their current name.
    pub(crate) fn rename<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for ((_, player), name) in self.players.iter_mut().zip(names) {
            player.name = name.into();
        }
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Self::Output {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeatConfig;

    fn roster() -> Roster {
        Roster::from_config(&GameConfig::new(vec![
            SeatConfig::human("You"),
            SeatConfig::ai("Julian").with_persona("a baker"),
            SeatConfig::ai("Sofia"),
        ]))
    }

    #[test]
    fn test_from_config_maps_seats_in_order() {
        let roster = roster();

        assert_eq!(roster.player_count(), 3);
        assert_eq!(roster[PlayerId::new(0)].name, "You");
        assert_eq!(roster[PlayerId::new(1)].name, "Julian");
        assert_eq!(roster[PlayerId::new(2)].name, "Sofia");
        assert_eq!(
            roster[PlayerId::new(1)].persona.as_deref(),
            Some("a baker")
        );
        assert!(roster.iter().all(|p| p.role.is_none()));
        assert!(roster.iter().all(|p| p.vote_cast.is_none()));
    }

    #[test]
    fn test_human_seat() {
        let roster = Roster::from_config(&GameConfig::new(vec![
            SeatConfig::ai("A"),
            SeatConfig::human("B"),
            SeatConfig::ai("C"),
        ]));

        assert_eq!(roster.human_seat(), PlayerId::new(1));
        assert_eq!(roster.human().name, "B");
        assert_eq!(roster.ai_players().count(), 2);
    }

    #[test]
    fn test_assign_roles() {
        let mut roster = roster();
        roster.get_mut(PlayerId::new(0)).vote_cast = Some(PlayerId::new(1));

        roster.assign_roles(PlayerId::new(2));

        assert_eq!(roster[PlayerId::new(0)].role, Some(Role::Innocent));
        assert_eq!(roster[PlayerId::new(1)].role, Some(Role::Innocent));
        assert_eq!(roster[PlayerId::new(2)].role, Some(Role::Impostor));
        assert!(roster.iter().all(|p| p.vote_cast.is_none()));
        assert_eq!(roster.impostor().map(|p| p.id), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_clear_roles_keeps_names() {
        let mut roster = roster();
        roster.assign_roles(PlayerId::new(1));
        roster.get_mut(PlayerId::new(0)).vote_cast = Some(PlayerId::new(1));

        roster.clear_roles();

        assert!(roster.iter().all(|p| p.role.is_none()));
        assert!(roster.iter().all(|p| p.vote_cast.is_none()));
        assert_eq!(roster[PlayerId::new(1)].name, "Julian");
        assert!(roster.impostor().is_none());
    }

    #[test]
    fn test_all_votes_in() {
        let mut roster = roster();
        assert!(!roster.all_votes_in());

        roster.get_mut(PlayerId::new(0)).vote_cast = Some(PlayerId::new(1));
        roster.get_mut(PlayerId::new(1)).vote_cast = Some(PlayerId::new(0));
        assert!(!roster.all_votes_in());

        roster.get_mut(PlayerId::new(2)).vote_cast = Some(PlayerId::new(0));
        assert!(roster.all_votes_in());
    }

    #[test]
    fn test_rename_ignores_surplus() {
        let mut roster = roster();

        roster.rename(vec!["Ana", "Bo", "Cy", "Extra"]);
        assert_eq!(roster[PlayerId::new(0)].name, "Ana");
        assert_eq!(roster[PlayerId::new(2)].name, "Cy");

        roster.rename(vec!["Zed"]);
        assert_eq!(roster[PlayerId::new(0)].name, "Zed");
        assert_eq!(roster[PlayerId::new(1)].name, "Bo");
    }

    #[test]
    fn test_contains() {
        let roster = roster();
        assert!(roster.contains(PlayerId::new(2)));
        assert!(!roster.contains(PlayerId::new(3)));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&Role::Impostor).unwrap(),
            "\"IMPOSTOR\""
        );
        assert_eq!(
            serde_json::to_string(&Role::Innocent).unwrap(),
            "\"INNOCENT\""
        );
    }
}
