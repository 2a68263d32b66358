use super::participant::Participant;
use crate::config::DEFAULT_JUNGLE_SPELL_ID;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Canonical lane roles. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bottom, Role::Support];

    /// Resolution order: strongest signal first.
    pub const PRIORITY: [Role; 5] = [Role::Jungle, Role::Support, Role::Bottom, Role::Top, Role::Mid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bottom => "bottom",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" | "jg" => Ok(Role::Jungle),
            "mid" | "middle" => Ok(Role::Mid),
            "bottom" | "bot" | "adc" | "carry" => Ok(Role::Bottom),
            "support" | "utility" | "sup" => Ok(Role::Support),
            _ => Err(AppError::InvalidRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Champion id -> roles the champion can play, most natural first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChampionRoleTable {
    roles: HashMap<i32, Vec<Role>>,
}

impl ChampionRoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_champion(mut self, champion_id: i32, roles: Vec<Role>) -> Self {
        self.roles.insert(champion_id, roles);
        self
    }

    pub fn roles_for(&self, champion_id: i32) -> &[Role] {
        self.roles.get(&champion_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of `role` in the champion's list; `None` if it cannot play it.
    pub fn rank(&self, champion_id: i32, role: Role) -> Option<usize> {
        self.roles_for(champion_id).iter().position(|r| *r == role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<(i32, Vec<Role>)> for ChampionRoleTable {
    fn from_iter<I: IntoIterator<Item = (i32, Vec<Role>)>>(iter: I) -> Self {
        ChampionRoleTable {
            roles: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InferenceConfig {
    pub jungle_spell_id: i32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            jungle_spell_id: DEFAULT_JUNGLE_SPELL_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentSource {
    /// Matched through the role table (and the jungle ability for junglers).
    Signal,
    /// Filled with whoever was left.
    Fallback,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleSlot<'a> {
    pub participant: &'a Participant,
    pub source: AssignmentSource,
}

pub type TeamRoles<'a> = BTreeMap<Role, RoleSlot<'a>>;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RoleAssignment<'a> {
    pub teams: BTreeMap<i32, TeamRoles<'a>>,
}

impl<'a> RoleAssignment<'a> {
    pub fn team(&self, team_id: i32) -> Option<&TeamRoles<'a>> {
        self.teams.get(&team_id)
    }

    pub fn participant(&self, team_id: i32, role: Role) -> Option<&'a Participant> {
        self.team(team_id)
            .and_then(|roles| roles.get(&role))
            .map(|slot| slot.participant)
    }

    /// Team and role a player ended up in, if assigned.
    pub fn role_of(&self, identity: &str) -> Option<(i32, Role)> {
        self.teams.iter().find_map(|(team_id, roles)| {
            roles
                .iter()
                .find(|(_, slot)| slot.participant.identity == identity)
                .map(|(role, _)| (*team_id, *role))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

pub struct RoleInferenceEngine {
    config: InferenceConfig,
}

impl RoleInferenceEngine {
    pub fn new(config: InferenceConfig) -> Self {
        RoleInferenceEngine { config }
    }

    pub fn infer<'a>(
        &self,
        participants: &'a [Participant],
        table: &ChampionRoleTable,
    ) -> RoleAssignment<'a> {
        let mut by_team: BTreeMap<i32, Vec<&'a Participant>> = BTreeMap::new();
        for participant in participants {
            by_team.entry(participant.team_id).or_default().push(participant);
        }

        let teams = by_team
            .into_iter()
            .map(|(team_id, members)| (team_id, self.assign_team(team_id, &members, table)))
            .collect();

        RoleAssignment { teams }
    }

    fn assign_team<'a>(
        &self,
        team_id: i32,
        members: &[&'a Participant],
        table: &ChampionRoleTable,
    ) -> TeamRoles<'a> {
        let mut used = vec![false; members.len()];
        let mut roles = TeamRoles::new();

        for role in Role::PRIORITY {
            // min_by_key keeps the first of equal ranks, so input order breaks ties
            let best = members
                .iter()
                .enumerate()
                .filter(|(idx, _)| !used[*idx])
                .filter(|(_, p)| role != Role::Jungle || p.has_spell(self.config.jungle_spell_id))
                .filter_map(|(idx, p)| table.rank(p.champion_id, role).map(|rank| (idx, rank)))
                .min_by_key(|(_, rank)| *rank);

            if let Some((idx, _)) = best {
                used[idx] = true;
                roles.insert(
                    role,
                    RoleSlot {
                        participant: members[idx],
                        source: AssignmentSource::Signal,
                    },
                );
            }
        }

        for role in Role::PRIORITY {
            if roles.contains_key(&role) {
                continue;
            }
            let Some(idx) = used.iter().position(|u| !u) else {
                break;
            };
            used[idx] = true;
            debug!(
                "team {}: {} falls back to {} (champion {})",
                team_id, members[idx].identity, role, members[idx].champion_id
            );
            roles.insert(
                role,
                RoleSlot {
                    participant: members[idx],
                    source: AssignmentSource::Fallback,
                },
            );
        }

        let dropped = used.iter().filter(|u| !**u).count();
        if dropped > 0 {
            debug!("team {}: {} extra participants left without a role", team_id, dropped);
        }

        roles
    }
}

impl Default for RoleInferenceEngine {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}

/// Infers roles with the default jungle ability id.
pub fn infer_roles<'a>(
    participants: &'a [Participant],
    table: &ChampionRoleTable,
) -> RoleAssignment<'a> {
    RoleInferenceEngine::default().infer(participants, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SMITE: i32 = 11;
    const FLASH: i32 = 4;

    fn player(id: &str, team: i32, champion: i32, spells: (i32, i32)) -> Participant {
        let mut p = Participant::new(id, team, champion);
        p.spell1_id = spells.0;
        p.spell2_id = spells.1;
        p
    }

    fn table() -> ChampionRoleTable {
        ChampionRoleTable::new()
            .with_champion(1, vec![Role::Top])
            .with_champion(2, vec![Role::Jungle, Role::Top])
            .with_champion(3, vec![Role::Mid])
            .with_champion(4, vec![Role::Bottom])
            .with_champion(5, vec![Role::Support, Role::Mid])
            .with_champion(6, vec![Role::Top, Role::Jungle])
    }

    fn standard_team(team: i32) -> Vec<Participant> {
        vec![
            player(&format!("{team}-top"), team, 1, (FLASH, 12)),
            player(&format!("{team}-jg"), team, 2, (SMITE, FLASH)),
            player(&format!("{team}-mid"), team, 3, (FLASH, 14)),
            player(&format!("{team}-bot"), team, 4, (FLASH, 7)),
            player(&format!("{team}-sup"), team, 5, (FLASH, 3)),
        ]
    }

    #[test]
    fn assigns_full_match() {
        let mut participants = standard_team(100);
        participants.extend(standard_team(200));

        let result = infer_roles(&participants, &table());
        assert_eq!(result.teams.len(), 2);

        for team in [100, 200] {
            let roles = result.team(team).unwrap();
            assert_eq!(roles.len(), 5);
            assert_eq!(roles[&Role::Top].participant.identity, format!("{team}-top"));
            assert_eq!(roles[&Role::Jungle].participant.identity, format!("{team}-jg"));
            assert_eq!(roles[&Role::Mid].participant.identity, format!("{team}-mid"));
            assert_eq!(roles[&Role::Bottom].participant.identity, format!("{team}-bot"));
            assert_eq!(roles[&Role::Support].participant.identity, format!("{team}-sup"));
            assert!(roles.values().all(|s| s.source == AssignmentSource::Signal));
        }
    }

    #[test]
    fn smite_holder_takes_jungle_regardless_of_stats() {
        // champion 6 is listed as top first, jungle second
        let mut participants = vec![
            player("a", 100, 2, (FLASH, 12)),
            player("b", 100, 6, (FLASH, SMITE)),
            player("c", 100, 3, (FLASH, 14)),
            player("d", 100, 4, (FLASH, 7)),
            player("e", 100, 5, (FLASH, 3)),
        ];
        participants[0].kills = 20;
        participants[1].deaths = 12;

        let result = infer_roles(&participants, &table());
        assert_eq!(result.participant(100, Role::Jungle).unwrap().identity, "b");
        // the natural jungler without smite lands on its second role
        assert_eq!(result.participant(100, Role::Top).unwrap().identity, "a");
    }

    #[test]
    fn jungle_requires_smite() {
        let participants = vec![
            player("a", 100, 2, (FLASH, 12)),
            player("b", 100, 1, (FLASH, 12)),
        ];

        let result = infer_roles(&participants, &table());
        let roles = result.team(100).unwrap();
        // nobody has smite: "b" is the more natural top, "a" is left for jungle
        assert_eq!(roles[&Role::Top].participant.identity, "b");
        assert_eq!(roles[&Role::Jungle].participant.identity, "a");
        assert_eq!(roles[&Role::Jungle].source, AssignmentSource::Fallback);
    }

    #[test]
    fn ties_keep_input_order() {
        let participants = vec![
            player("first", 100, 3, (FLASH, 14)),
            player("second", 100, 3, (FLASH, 14)),
        ];

        let result = infer_roles(&participants, &table());
        assert_eq!(result.participant(100, Role::Mid).unwrap().identity, "first");
        // leftover goes to the first unfilled role in priority order
        assert_eq!(result.participant(100, Role::Jungle).unwrap().identity, "second");
    }

    #[test]
    fn more_natural_fit_wins() {
        // both can support; champion 5 lists it first
        let table = table().with_champion(7, vec![Role::Mid, Role::Support]);
        let participants = vec![
            player("mage", 100, 7, (FLASH, 14)),
            player("enchanter", 100, 5, (FLASH, 3)),
        ];

        let result = infer_roles(&participants, &table);
        assert_eq!(result.participant(100, Role::Support).unwrap().identity, "enchanter");
        assert_eq!(result.participant(100, Role::Mid).unwrap().identity, "mage");
    }

    #[test]
    fn unknown_champions_fall_back_to_bijection() {
        let participants: Vec<_> = (0..5)
            .map(|i| player(&format!("p{i}"), 100, 900 + i, (FLASH, SMITE)))
            .collect();

        let result = infer_roles(&participants, &ChampionRoleTable::new());
        let roles = result.team(100).unwrap();
        assert_eq!(roles.len(), 5);

        let ids: HashSet<_> = roles.values().map(|s| s.participant.identity.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(roles.values().all(|s| s.source == AssignmentSource::Fallback));

        // fallback walks roles in priority order and players in input order
        assert_eq!(roles[&Role::Jungle].participant.identity, "p0");
        assert_eq!(roles[&Role::Support].participant.identity, "p1");
        assert_eq!(roles[&Role::Bottom].participant.identity, "p2");
        assert_eq!(roles[&Role::Top].participant.identity, "p3");
        assert_eq!(roles[&Role::Mid].participant.identity, "p4");
    }

    #[test]
    fn short_team_yields_partial_mapping() {
        let participants = vec![
            player("a", 100, 3, (FLASH, 14)),
            player("b", 100, 1, (FLASH, 12)),
            player("c", 100, 999, (FLASH, 12)),
        ];

        let result = infer_roles(&participants, &table());
        let roles = result.team(100).unwrap();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles[&Role::Mid].participant.identity, "a");
        assert_eq!(roles[&Role::Top].participant.identity, "b");
        assert_eq!(roles[&Role::Jungle].participant.identity, "c");
    }

    #[test]
    fn oversized_team_drops_extras() {
        let participants: Vec<_> = (0..7)
            .map(|i| player(&format!("p{i}"), 100, 900 + i, (FLASH, 12)))
            .collect();

        let result = infer_roles(&participants, &table());
        let roles = result.team(100).unwrap();
        assert_eq!(roles.len(), 5);
        assert_eq!(result.role_of("p5"), None);
        assert_eq!(result.role_of("p6"), None);
    }

    #[test]
    fn empty_input() {
        let result = infer_roles(&[], &table());
        assert!(result.is_empty());
    }

    #[test]
    fn custom_jungle_spell() {
        let engine = RoleInferenceEngine::new(InferenceConfig { jungle_spell_id: 55 });
        let participants = vec![
            player("smite", 100, 2, (FLASH, SMITE)),
            player("custom", 100, 6, (FLASH, 55)),
        ];

        let result = engine.infer(&participants, &table());
        assert_eq!(result.participant(100, Role::Jungle).unwrap().identity, "custom");
        assert_eq!(result.participant(100, Role::Top).unwrap().identity, "smite");
    }

    #[test]
    fn role_of_finds_team_and_role() {
        let participants = standard_team(200);
        let result = infer_roles(&participants, &table());
        assert_eq!(result.role_of("200-sup"), Some((200, Role::Support)));
        assert_eq!(result.role_of("missing"), None);
    }

    #[test]
    fn parses_role_aliases() {
        assert_eq!("UTILITY".parse::<Role>().unwrap(), Role::Support);
        assert_eq!("Middle".parse::<Role>().unwrap(), Role::Mid);
        assert_eq!("adc".parse::<Role>().unwrap(), Role::Bottom);
        assert_eq!("JUNGLE".parse::<Role>().unwrap(), Role::Jungle);
        assert!(matches!("roam".parse::<Role>(), Err(AppError::InvalidRole(_))));
    }

    #[test]
    fn role_table_from_json() {
        let json = r#"{ "64": ["jungle", "TOP"], "412": ["UTILITY"] }"#;
        let table: ChampionRoleTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.roles_for(64), &[Role::Jungle, Role::Top]);
        assert_eq!(table.rank(64, Role::Top), Some(1));
        assert_eq!(table.rank(412, Role::Mid), None);
        assert!(table.roles_for(1).is_empty());

        let bad = r#"{ "64": ["roam"] }"#;
        assert!(serde_json::from_str::<ChampionRoleTable>(bad).is_err());
    }

    #[test]
    fn participant_without_champion_goes_to_fallback() {
        let participants: Vec<Participant> = serde_json::from_str(
            r#"[
                { "identity": "known", "teamId": 100, "championId": 3 },
                { "identity": "blank", "teamId": 100 }
            ]"#,
        )
        .unwrap();

        let result = infer_roles(&participants, &table());
        let roles = result.team(100).unwrap();
        assert_eq!(roles[&Role::Mid].participant.identity, "known");
        assert_eq!(roles[&Role::Jungle].participant.identity, "blank");
        assert_eq!(roles[&Role::Jungle].source, AssignmentSource::Fallback);
    }
}
