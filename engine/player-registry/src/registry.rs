use crate::types::{Category, Player, PlayerData, PlayerId, PlayerLookupError};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Player Registry - the long-lived pool of rosterable players
///
/// Scoring passes read position, category, fatigue and birth date from here.
/// The registry is also the write target for quality refreshes before a
/// GameWeek and for fatigue write-backs after one.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    /// Map from player ID to Player
    players_by_id: HashMap<PlayerId, Player>,

    /// Map from player name to player ID (for quick lookup)
    ids_by_name: HashMap<String, PlayerId>,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { players_by_id: HashMap::new(), ids_by_name: HashMap::new() }
    }

    /// Build a registry from a list of players, rejecting duplicate ids
    pub fn from_players(players: Vec<Player>) -> Result<Self, PlayerLookupError> {
        let mut registry = Self::new();
        for player in players {
            registry.insert(player)?;
        }
        Ok(registry)
    }

    /// Load player data from a JSON file
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        info!("Loading player data from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path)
            .await
            .with_context(|| format!("Failed to read {:?}", file_path.as_ref()))?;
        let player_data: PlayerData =
            serde_json::from_str(&json_content).context("Failed to parse player data")?;

        info!(
            "Loaded {} players for season {} (updated {})",
            player_data.players.len(),
            player_data.season,
            player_data.last_updated
        );

        Ok(Self::from_players(player_data.players)?)
    }

    /// Register a player
    pub fn insert(&mut self, player: Player) -> Result<(), PlayerLookupError> {
        if self.players_by_id.contains_key(&player.player_id) {
            return Err(PlayerLookupError::DuplicatePlayer(player.player_id));
        }
        if let Some(existing) = self.ids_by_name.get(&player.name) {
            warn!(
                "Players {} and {} share the name '{}'; name lookup resolves to {}",
                existing, player.player_id, player.name, existing
            );
        } else {
            self.ids_by_name.insert(player.name.clone(), player.player_id);
        }
        self.players_by_id.insert(player.player_id, player);
        Ok(())
    }

    /// Get a player by ID
    pub fn get(&self, player_id: PlayerId) -> Result<&Player, PlayerLookupError> {
        self.players_by_id.get(&player_id).ok_or(PlayerLookupError::PlayerNotFound(player_id))
    }

    /// Get a player for in-place updates
    pub fn get_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, PlayerLookupError> {
        self.players_by_id.get_mut(&player_id).ok_or(PlayerLookupError::PlayerNotFound(player_id))
    }

    /// Get a player by exact name
    pub fn get_by_name(&self, name: &str) -> Result<&Player, PlayerLookupError> {
        let player_id = self
            .ids_by_name
            .get(name)
            .ok_or_else(|| PlayerLookupError::NameNotFound(name.to_string()))?;

        self.get(*player_id)
    }

    /// Check if a player is registered
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players_by_id.contains_key(&player_id)
    }

    /// All players, ordered by id
    pub fn all_players(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players_by_id.values().collect();
        players.sort_by_key(|p| p.player_id);
        players
    }

    /// Top N players by PGS
    pub fn get_top_players(&self, limit: usize) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players_by_id.values().collect();
        players.sort_by(|a, b| b.pgs.total_cmp(&a.pgs).then(a.player_id.cmp(&b.player_id)));
        players.truncate(limit);
        players
    }

    /// The given players ordered by PGS (highest first, ties by id)
    pub fn get_players_by_pgs(&self, ids: &[PlayerId]) -> Result<Vec<&Player>, PlayerLookupError> {
        let mut players = ids.iter().map(|id| self.get(*id)).collect::<Result<Vec<_>, _>>()?;
        players.sort_by(|a, b| b.pgs.total_cmp(&a.pgs).then(a.player_id.cmp(&b.player_id)));
        Ok(players)
    }

    /// Players in a category, ordered by id
    pub fn players_in_category(&self, category: Category) -> Vec<&Player> {
        let mut players: Vec<&Player> =
            self.players_by_id.values().filter(|p| p.category == category).collect();
        players.sort_by_key(|p| p.player_id);
        players
    }

    /// Search for players by partial name match
    pub fn search_players(&self, query: &str) -> Vec<&Player> {
        let query_lower = query.to_lowercase();
        let mut players: Vec<&Player> = self
            .players_by_id
            .values()
            .filter(|player| player.name.to_lowercase().contains(&query_lower))
            .collect();
        players.sort_by_key(|p| p.player_id);
        players
    }

    /// Store a freshly computed PGS and category
    pub fn update_quality(
        &mut self,
        player_id: PlayerId,
        pgs: f64,
        category: Category,
    ) -> Result<(), PlayerLookupError> {
        let player = self.get_mut(player_id)?;
        if player.category != category {
            debug!(
                "Player {} moves from {} to {} (PGS {:.3})",
                player_id, player.category, category, pgs
            );
        }
        player.pgs = pgs;
        player.category = category;
        Ok(())
    }

    /// Persist the fatigue values produced by a scoring pass.
    ///
    /// All ids are checked before anything is written, so a bad id leaves the
    /// registry untouched.
    pub fn apply_fatigue_updates<I>(&mut self, updates: I) -> Result<usize, PlayerLookupError>
    where
        I: IntoIterator<Item = (PlayerId, f64)>,
    {
        let updates: Vec<(PlayerId, f64)> = updates.into_iter().collect();
        if let Some((missing, _)) = updates.iter().find(|(id, _)| !self.contains(*id)) {
            return Err(PlayerLookupError::PlayerNotFound(*missing));
        }

        for (player_id, fatigue) in &updates {
            if let Some(player) = self.players_by_id.get_mut(player_id) {
                player.fatigue = *fatigue;
            }
        }

        info!("Applied {} fatigue updates", updates.len());
        Ok(updates.len())
    }

    /// Get player count
    pub fn len(&self) -> usize {
        self.players_by_id.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.players_by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use chrono::NaiveDate;

    fn create_test_players() -> Vec<Player> {
        vec![
            Player::new(
                10,
                "Erling Haaland",
                Position::Attacker,
                "MCI",
                NaiveDate::from_ymd_opt(2000, 7, 21).unwrap(),
            )
            .with_category(Category::Star),
            Player::new(
                4,
                "Virgil van Dijk",
                Position::Defender,
                "LIV",
                NaiveDate::from_ymd_opt(1991, 7, 8).unwrap(),
            )
            .with_category(Category::Key),
        ]
    }

    #[test]
    fn test_registry_creation() {
        let registry = PlayerRegistry::from_players(create_test_players()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.contains(10));
        assert!(!registry.contains(99));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut players = create_test_players();
        players.push(players[0].clone());

        let err = PlayerRegistry::from_players(players).unwrap_err();
        assert_eq!(err, PlayerLookupError::DuplicatePlayer(10));
    }

    #[test]
    fn test_player_lookup() {
        let registry = PlayerRegistry::from_players(create_test_players()).unwrap();

        let haaland = registry.get_by_name("Erling Haaland").unwrap();
        assert_eq!(haaland.position, Position::Attacker);
        assert_eq!(haaland.team, "MCI");

        let by_id = registry.get(haaland.player_id).unwrap();
        assert_eq!(by_id.name, "Erling Haaland");

        assert_eq!(registry.get(99).unwrap_err(), PlayerLookupError::PlayerNotFound(99));
        assert!(matches!(
            registry.get_by_name("Nobody"),
            Err(PlayerLookupError::NameNotFound(_))
        ));
    }

    #[test]
    fn test_search_players() {
        let registry = PlayerRegistry::from_players(create_test_players()).unwrap();

        let results = registry.search_players("haal");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].player_id, 10);

        let results = registry.search_players("VAN DIJK");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].player_id, 4);
    }

    #[test]
    fn test_quality_update_and_ranking() {
        let mut registry = PlayerRegistry::from_players(create_test_players()).unwrap();

        registry.update_quality(4, 8.1, Category::Star).unwrap();
        registry.update_quality(10, 7.0, Category::Key).unwrap();

        let top = registry.get_top_players(1);
        assert_eq!(top[0].player_id, 4);
        assert_eq!(registry.players_in_category(Category::Star).len(), 1);
        assert!(registry.update_quality(99, 5.0, Category::Wild).is_err());
    }

    #[test]
    fn test_players_by_pgs_only_returns_requested() {
        let mut players = create_test_players();
        players.push(
            Player::new(
                7,
                "Bukayo Saka",
                Position::Midfielder,
                "ARS",
                NaiveDate::from_ymd_opt(2001, 9, 5).unwrap(),
            )
            .with_category(Category::Star),
        );
        let mut registry = PlayerRegistry::from_players(players).unwrap();
        registry.update_quality(10, 9.0, Category::Star).unwrap();
        registry.update_quality(4, 6.2, Category::Key).unwrap();
        registry.update_quality(7, 7.9, Category::Star).unwrap();

        let ordered: Vec<PlayerId> =
            registry.get_players_by_pgs(&[4, 7]).unwrap().iter().map(|p| p.player_id).collect();
        assert_eq!(ordered, vec![7, 4]);

        assert_eq!(
            registry.get_players_by_pgs(&[4, 99]).unwrap_err(),
            PlayerLookupError::PlayerNotFound(99)
        );
    }

    #[test]
    fn test_fatigue_updates_are_all_or_nothing() {
        let mut registry = PlayerRegistry::from_players(create_test_players()).unwrap();

        let err = registry.apply_fatigue_updates(vec![(10, 0.9), (99, 0.5)]).unwrap_err();
        assert_eq!(err, PlayerLookupError::PlayerNotFound(99));
        assert_eq!(registry.get(10).unwrap().fatigue, 1.0);

        let applied = registry.apply_fatigue_updates(vec![(10, 0.9), (4, -0.05)]).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(registry.get(10).unwrap().fatigue, 0.9);
        assert_eq!(registry.get(4).unwrap().fatigue, -0.05);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        let data = PlayerData {
            season: "2025-26".to_string(),
            last_updated: chrono::Utc::now(),
            players: create_test_players(),
        };
        tokio::fs::write(&path, serde_json::to_string_pretty(&data).unwrap()).await.unwrap();

        let registry = PlayerRegistry::load_from_file(&path).await.unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(4).unwrap().category, Category::Key);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlayerRegistry::load_from_file(dir.path().join("absent.json")).await;
        assert!(result.is_err());
    }
}
