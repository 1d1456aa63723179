/// The in-flight event, with whatever it is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EventProgress {
    AwaitingAck {
        text: String,
    },
    Walking {
        who: ActorId,
        direction: Direction,
        started: bool,
        warned_blocked: bool,
    },
    Standing {
        who: ActorId,
        remaining_ms: u64,
    },
}

/// A cutscene outcome the host has to apply: the runner only ever
/// touches the mounted map, never the world around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CutsceneEffect {
    ChangeMap(MapId),
    EnterPause,
}

/// Plays one scripted scenario at a time, strictly in order: an event
/// begins only after the previous one reported completion. Raises the
/// map's cutscene flag before the first event and lowers it after the
/// last, re-arming idle routines on the way out.
#[derive(Debug, Default)]
pub(crate) struct CutsceneRunner {
    queue: VecDeque<CutsceneEvent>,
    current: Option<EventProgress>,
}

impl CutsceneRunner {
    /// Queues a scenario and raises the map's cutscene flag. An empty
    /// scenario is a no-op.
    fn start(&mut self, events: Vec<CutsceneEvent>, map: &mut OverworldMap) {
        if events.is_empty() {
            return;
        }
        debug!(map = %map.id, events = events.len(), "cutscene_started");
        map.cutscene_playing = true;
        self.queue = events.into();
        self.current = None;
    }

    fn has_pending(&self) -> bool {
        self.current.is_some() || !self.queue.is_empty()
    }

    /// One tick: settle the in-flight event, then begin queued events
    /// until one has to wait. At most one host effect per tick; the host
    /// applies it before the next event begins.
    fn advance(
        &mut self,
        input: &InputSnapshot,
        map: &mut OverworldMap,
        completed_steps: &[ActorId],
    ) -> Option<CutsceneEffect> {
        if !map.cutscene_playing {
            return None;
        }

        if let Some(progress) = self.current.take() {
            self.current = Self::step_in_flight(progress, input, map, completed_steps);
        }

        while self.current.is_none() {
            let Some(event) = self.queue.pop_front() else {
                self.finish(map);
                break;
            };
            if let Some(effect) = self.begin_event(event, map) {
                return Some(effect);
            }
        }
        None
    }

    fn step_in_flight(
        progress: EventProgress,
        input: &InputSnapshot,
        map: &mut OverworldMap,
        completed_steps: &[ActorId],
    ) -> Option<EventProgress> {
        match progress {
            EventProgress::AwaitingAck { text } => {
                if input.interact_pressed() {
                    None
                } else {
                    Some(EventProgress::AwaitingAck { text })
                }
            }
            EventProgress::Walking {
                who,
                direction,
                started,
                warned_blocked,
            } => {
                if started {
                    if completed_steps.contains(&who) {
                        return None;
                    }
                    return Some(EventProgress::Walking {
                        who,
                        direction,
                        started,
                        warned_blocked,
                    });
                }
                let Some(actor) = map.actors.get_mut(&who) else {
                    warn!(actor = %who, "cutscene_walk_missing_actor");
                    return None;
                };
                if actor.try_begin_step(direction, &mut map.walls) {
                    Some(EventProgress::Walking {
                        who,
                        direction,
                        started: true,
                        warned_blocked,
                    })
                } else {
                    if !warned_blocked {
                        warn!(actor = %who, ?direction, "cutscene_walk_blocked");
                    }
                    Some(EventProgress::Walking {
                        who,
                        direction,
                        started: false,
                        warned_blocked: true,
                    })
                }
            }
            EventProgress::Standing { who, remaining_ms } => {
                if remaining_ms <= MS_PER_TICK {
                    None
                } else {
                    Some(EventProgress::Standing {
                        who,
                        remaining_ms: remaining_ms - MS_PER_TICK,
                    })
                }
            }
        }
    }

    /// Sets up one event. Waiting events become `current`; host-level
    /// events return their effect; `Noop` does neither.
    fn begin_event(&mut self, event: CutsceneEvent, map: &mut OverworldMap) -> Option<CutsceneEffect> {
        match event {
            CutsceneEvent::TextMessage { text, face_player } => {
                if let Some(who) = face_player {
                    let player_facing = map
                        .actors
                        .get(&map.player_id)
                        .map(|player| player.facing);
                    if let (Some(facing), Some(actor)) = (player_facing, map.actors.get_mut(&who)) {
                        actor.facing = facing.invert();
                    }
                }
                info!(text = %text, "dialog_shown");
                self.current = Some(EventProgress::AwaitingAck { text });
                None
            }
            CutsceneEvent::Walk { who, direction } => {
                let who = who.unwrap_or_else(|| map.player_id.clone());
                self.current = Some(EventProgress::Walking {
                    who,
                    direction,
                    started: false,
                    warned_blocked: false,
                });
                None
            }
            CutsceneEvent::Stand {
                who,
                direction,
                duration_ms,
            } => {
                let who = who.unwrap_or_else(|| map.player_id.clone());
                if let Some(actor) = map.actors.get_mut(&who) {
                    actor.facing = direction;
                } else {
                    warn!(actor = %who, "cutscene_stand_missing_actor");
                }
                self.current = Some(EventProgress::Standing {
                    who,
                    remaining_ms: duration_ms,
                });
                None
            }
            CutsceneEvent::ChangeMap { map: target } => Some(CutsceneEffect::ChangeMap(target)),
            CutsceneEvent::Pause => Some(CutsceneEffect::EnterPause),
            CutsceneEvent::Noop => {
                debug!("cutscene_noop");
                None
            }
        }
    }

    fn finish(&mut self, map: &mut OverworldMap) {
        map.cutscene_playing = false;
        map.rearm_behaviors();
        debug!(map = %map.id, "cutscene_finished");
    }

    /// The dialog line currently awaiting acknowledgement, if any.
    fn dialog(&self) -> Option<&str> {
        match self.current.as_ref()? {
            EventProgress::AwaitingAck { text } => Some(text),
            _ => None,
        }
    }
}
