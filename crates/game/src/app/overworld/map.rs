/// The mounted map: the actor roster, the occupancy set shared by walls
/// and actors, and the footstep trigger table. Owns no reference back to
/// the host; the host asks and mutates.
#[derive(Debug)]
pub(crate) struct OverworldMap {
    id: MapId,
    lower_layer: String,
    upper_layer: String,
    player_id: ActorId,
    actors: BTreeMap<ActorId, Actor>,
    walls: WallMap,
    triggers: HashMap<CellPx, Vec<CutsceneEvent>>,
    cutscene_playing: bool,
}

impl OverworldMap {
    /// Builds the runtime map from a validated config. Static walls and
    /// every actor's starting cell are claimed up front; `player_override`
    /// replaces the configured player placement when restoring a save.
    fn mount(
        config: &MapConfig,
        player_override: Option<(CellPx, Direction)>,
    ) -> Result<Self, ConfigError> {
        let Some(player_config) = config.actors.iter().find(|actor| actor.is_player) else {
            return Err(ConfigError::MissingPlayer {
                map: config.id.to_string(),
            });
        };
        let player_id = player_config.id.clone();

        let mut walls = WallMap::from_cells(config.walls.iter().copied());
        let mut actors = BTreeMap::new();
        for actor_config in &config.actors {
            let mut actor = Actor::from_config(actor_config);
            if actor.is_player {
                if let Some((cell, facing)) = player_override {
                    actor.cell = cell;
                    actor.facing = facing;
                }
            }
            walls.add(actor.cell);
            actors.insert(actor.id.clone(), actor);
        }

        let triggers = config
            .footstep_triggers
            .iter()
            .map(|trigger| (trigger.cell, trigger.events.clone()))
            .collect();

        Ok(Self {
            id: config.id.clone(),
            lower_layer: config.lower_layer.clone(),
            upper_layer: config.upper_layer.clone(),
            player_id,
            actors,
            walls,
            triggers,
            cutscene_playing: false,
        })
    }

    /// One tick of everybody on the map: player intent, then idle
    /// routines, then movement progression. Player control and routines
    /// are gated while a cutscene is playing; in-flight steps always run
    /// to their destination. Returns who landed on a cell this tick.
    fn advance(&mut self, input: &InputSnapshot) -> Vec<ActorId> {
        if !self.cutscene_playing {
            if let Some(direction) = input.held_direction() {
                if let Some(player) = self.actors.get_mut(&self.player_id) {
                    player.try_begin_step(direction, &mut self.walls);
                }
            }
            for actor in self.actors.values_mut() {
                if !actor.is_player {
                    actor.advance_behavior(&mut self.walls);
                }
            }
        }

        let mut completed = Vec::new();
        for actor in self.actors.values_mut() {
            if actor.advance_movement() {
                completed.push(actor.id.clone());
            }
        }
        completed
    }

    /// Talk events of the actor on the cell the player faces, if any.
    fn action_events(&self) -> Option<Vec<CutsceneEvent>> {
        let player = self.actors.get(&self.player_id)?;
        let ahead = step(player.cell, player.facing);
        self.actors
            .values()
            .find(|actor| actor.cell == ahead && !actor.talk.is_empty())
            .map(|actor| actor.talk.clone())
    }

    fn footstep_events(&self, cell: CellPx) -> Option<Vec<CutsceneEvent>> {
        self.triggers.get(&cell).cloned()
    }

    fn rearm_behaviors(&mut self) {
        for actor in self.actors.values_mut() {
            actor.rearm_behavior();
        }
    }

    fn player_cell(&self) -> Option<CellPx> {
        self.actors.get(&self.player_id).map(|player| player.cell)
    }

    fn player_px(&self) -> Option<(i32, i32)> {
        self.actors
            .get(&self.player_id)
            .map(|player| player.position_px())
    }

    fn frame_sprites(&self) -> Vec<ActorSprite> {
        self.actors.values().map(Actor::sprite).collect()
    }
}
