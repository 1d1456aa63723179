/// The running world: the config table for every map, the mounted map,
/// and the cutscene runner. Implements the loop's simulation seam.
#[derive(Debug)]
pub(crate) struct Overworld {
    maps: HashMap<MapId, MapConfig>,
    map: OverworldMap,
    cutscene: CutsceneRunner,
    pending_entry: Option<Vec<CutsceneEvent>>,
    save_path: PathBuf,
}

impl Overworld {
    pub(crate) fn new(content: WorldContent, save_dir: &Path) -> Result<Self, ConfigError> {
        validate_content(&content)?;
        let WorldContent { start_map, maps } = content;
        let maps: HashMap<MapId, MapConfig> =
            maps.into_iter().map(|map| (map.id.clone(), map)).collect();
        let save_path = save_dir.join(PROGRESS_FILE_NAME);

        let mut mount_map = start_map;
        let mut player_override = None;
        if let Some(progress) = load_progress(&save_path) {
            let saved_map = MapId::new(progress.map_id.as_str());
            let saved_cell = CellPx::new(progress.x, progress.y);
            if !maps.contains_key(&saved_map) {
                warn!(map = %saved_map, "saved_map_unknown");
            } else if !is_tile_aligned(saved_cell) {
                warn!(x = saved_cell.x, y = saved_cell.y, "saved_position_misaligned");
            } else {
                info!(map = %saved_map, "progress_restored");
                mount_map = saved_map;
                player_override = Some((saved_cell, progress.facing));
            }
        }

        let config = maps
            .get(&mount_map)
            .ok_or_else(|| ConfigError::UnknownStartMap {
                map: mount_map.to_string(),
            })?;
        let map = OverworldMap::mount(config, player_override)?;
        info!(map = %map.id, actors = map.actors.len(), "map_mounted");
        let pending_entry = if player_override.is_none() {
            map.player_cell().and_then(|cell| map.footstep_events(cell))
        } else {
            None
        };

        Ok(Self {
            maps,
            map,
            cutscene: CutsceneRunner::default(),
            pending_entry,
            save_path,
        })
    }

    /// Tears down the mounted map and mounts `target`, transplanting the
    /// player's cell and facing so the transition is seamless in world
    /// coordinates. An unmountable target degrades to staying put.
    fn change_map(&mut self, target: MapId) {
        let Some(config) = self.maps.get(&target) else {
            warn!(map = %target, "change_map_unknown_target");
            return;
        };
        let carried = self
            .map
            .actors
            .get(&self.map.player_id)
            .map(|player| (player.cell, player.facing));
        match OverworldMap::mount(config, carried) {
            Ok(map) => {
                self.map = map;
                if self.cutscene.has_pending() {
                    // The rest of the scenario plays out on the new map.
                    self.map.cutscene_playing = true;
                }
                self.pending_entry = self
                    .map
                    .player_cell()
                    .and_then(|cell| self.map.footstep_events(cell));
                info!(map = %self.map.id, actors = self.map.actors.len(), "map_mounted");
                self.save_progress_now();
            }
            Err(error) => warn!(map = %target, error = %error, "change_map_failed"),
        }
    }

    fn save_progress_now(&self) {
        let Some(player) = self.map.actors.get(&self.map.player_id) else {
            return;
        };
        let progress = Progress {
            save_version: PROGRESS_SAVE_VERSION,
            map_id: self.map.id.to_string(),
            x: player.cell.x,
            y: player.cell.y,
            facing: player.facing,
        };
        save_progress(&self.save_path, &progress);
    }
}

impl Simulation for Overworld {
    fn advance(&mut self, input: &InputSnapshot) -> SimCommand {
        let completed = self.map.advance(input);

        if !self.map.cutscene_playing {
            // A footstep trigger that loses this tick to an entry check,
            // escape, or interact is deferred, not dropped: the step that
            // reached the cell will never complete again.
            let footsteps = if completed.contains(&self.map.player_id) {
                self.map
                    .player_cell()
                    .and_then(|cell| self.map.footstep_events(cell))
            } else {
                None
            };
            if let Some(events) = self.pending_entry.take() {
                self.cutscene.start(events, &mut self.map);
                self.pending_entry = footsteps;
            } else if input.escape_pressed() {
                self.cutscene
                    .start(vec![CutsceneEvent::Pause], &mut self.map);
                self.pending_entry = footsteps;
            } else if input.interact_pressed() {
                if let Some(events) = self.map.action_events() {
                    self.cutscene.start(events, &mut self.map);
                    self.pending_entry = footsteps;
                } else if let Some(events) = footsteps {
                    self.cutscene.start(events, &mut self.map);
                }
            } else if let Some(events) = footsteps {
                self.cutscene.start(events, &mut self.map);
            }
        }

        if let Some(effect) = self.cutscene.advance(input, &mut self.map, &completed) {
            match effect {
                CutsceneEffect::ChangeMap(target) => self.change_map(target),
                CutsceneEffect::EnterPause => {
                    self.save_progress_now();
                    return SimCommand::EnterPause;
                }
            }
        }
        SimCommand::Continue
    }

    fn frame(&self) -> FrameSnapshot {
        let camera_px = self
            .map
            .player_px()
            .map(|(x, y)| (x + TILE_SIZE_PX / 2, y + TILE_SIZE_PX / 2))
            .unwrap_or((0, 0));
        FrameSnapshot {
            lower_layer: self.map.lower_layer.clone(),
            upper_layer: self.map.upper_layer.clone(),
            camera_px,
            sprites: self.map.frame_sprites(),
            wall_cells: self.map.walls.cells().collect(),
            dialog: self.cutscene.dialog().map(str::to_string),
        }
    }

    fn resume_from_pause(&mut self) {
        debug!("pause_dismissed");
    }
}
