use crate::player::{Player, PlayerId};
use crate::state::GameState;
use crate::team::Team;

/// A builder for filtering the players seated in a game.
pub struct PlayerQuery<'s> {
    state: &'s GameState,
    role_filter: Option<String>,
    team_filter: Option<Team>,
    count_as_filter: Option<Team>,
    alive_filter: Option<bool>,
    excluded: Vec<PlayerId>,
}

impl<'s> PlayerQuery<'s> {
    /// A query over every seated player.
    pub fn new(state: &'s GameState) -> Self {
        Self {
            state,
            role_filter: None,
            team_filter: None,
            count_as_filter: None,
            alive_filter: None,
            excluded: Vec::new(),
        }
    }

    /// Filter to players holding a role.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role_filter = Some(role.into());
        self
    }

    /// Filter to players whose real team matches.
    pub fn team(mut self, team: Team) -> Self {
        self.team_filter = Some(team);
        self
    }

    /// Filter to players counted as the given team for win accounting.
    pub fn counted_as(mut self, team: Team) -> Self {
        self.count_as_filter = Some(team);
        self
    }

    /// Only living players.
    pub fn alive(mut self) -> Self {
        self.alive_filter = Some(true);
        self
    }

    /// Only dead players.
    pub fn dead(mut self) -> Self {
        self.alive_filter = Some(false);
        self
    }

    /// Leave out a player.
    pub fn excluding(mut self, id: PlayerId) -> Self {
        self.excluded.push(id);
        self
    }

    /// Execute the query and return matching players ordered by id.
    pub fn execute(self) -> Vec<&'s Player> {
        let mut results: Vec<&Player> = self
            .state
            .players()
            .iter()
            .filter(|p| self.matches(p))
            .collect();
        results.sort_by_key(|p| p.id);
        results
    }

    /// Matching player ids, ordered.
    pub fn ids(self) -> Vec<PlayerId> {
        self.execute().into_iter().map(|p| p.id).collect()
    }

    /// Count matching players without collecting them.
    pub fn count(self) -> usize {
        self.state.players().iter().filter(|p| self.matches(p)).count()
    }

    fn matches(&self, player: &Player) -> bool {
        if self
            .role_filter
            .as_deref()
            .is_some_and(|role| !player.has_role(role))
        {
            return false;
        }
        if self
            .team_filter
            .is_some_and(|team| player.role_state.real_team != team)
        {
            return false;
        }
        if self
            .count_as_filter
            .is_some_and(|team| player.role_state.count_as != team)
        {
            return false;
        }
        if self.alive_filter.is_some_and(|alive| player.alive != alive) {
            return false;
        }
        !self.excluded.contains(&player.id)
    }
}
