#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveState {
    Idle,
    Stepping { direction: Direction, remaining_px: i32 },
}

/// A grid-locked character. `cell` is the resting cell, or the reserved
/// destination while a step is in flight; the drawn position
/// interpolates toward it one pixel per tick.
#[derive(Debug, Clone)]
pub(crate) struct Actor {
    id: ActorId,
    cell: CellPx,
    facing: Direction,
    is_player: bool,
    move_state: MoveState,
    behavior_loop: Vec<BehaviorStep>,
    behavior_index: usize,
    stand_remaining_ms: Option<u64>,
    talk: Vec<CutsceneEvent>,
}

impl Actor {
    fn from_config(config: &ActorConfig) -> Self {
        Self {
            id: config.id.clone(),
            cell: config.start,
            facing: config.facing,
            is_player: config.is_player,
            move_state: MoveState::Idle,
            behavior_loop: config.behavior_loop.clone(),
            behavior_index: 0,
            stand_remaining_ms: None,
            talk: config.talk.clone(),
        }
    }

    fn is_idle(&self) -> bool {
        matches!(self.move_state, MoveState::Idle)
    }

    /// Turns to face `direction` and, when idle with a free destination,
    /// claims it in the wall map and starts the step. A blocked or
    /// mid-step attempt changes facing only.
    fn try_begin_step(&mut self, direction: Direction, walls: &mut WallMap) -> bool {
        self.facing = direction;
        if !self.is_idle() {
            return false;
        }
        if walls.is_blocked(self.cell, direction) {
            return false;
        }
        walls.shift(self.cell, direction);
        self.cell = step(self.cell, direction);
        self.move_state = MoveState::Stepping {
            direction,
            remaining_px: TILE_SIZE_PX,
        };
        true
    }

    /// Moves an in-flight step forward one tick. True on the tick the
    /// actor lands on its destination cell.
    fn advance_movement(&mut self) -> bool {
        let MoveState::Stepping {
            direction,
            remaining_px,
        } = self.move_state
        else {
            return false;
        };
        let remaining_px = remaining_px - WALK_SPEED_PX_PER_TICK;
        if remaining_px <= 0 {
            self.move_state = MoveState::Idle;
            return true;
        }
        self.move_state = MoveState::Stepping {
            direction,
            remaining_px,
        };
        false
    }

    /// One tick of the idle routine. Stand entries count down wall-clock
    /// style; walk entries retry while blocked and hand over to the next
    /// entry once the step is underway.
    fn advance_behavior(&mut self, walls: &mut WallMap) {
        if self.behavior_loop.is_empty() || !self.is_idle() {
            return;
        }
        let index = self.behavior_index % self.behavior_loop.len();
        match self.behavior_loop[index].clone() {
            BehaviorStep::Stand {
                direction,
                duration_ms,
            } => {
                self.facing = direction;
                let remaining = self.stand_remaining_ms.unwrap_or(duration_ms);
                if remaining <= MS_PER_TICK {
                    self.stand_remaining_ms = None;
                    self.behavior_index = (index + 1) % self.behavior_loop.len();
                } else {
                    self.stand_remaining_ms = Some(remaining - MS_PER_TICK);
                }
            }
            BehaviorStep::Walk { direction } => {
                if self.try_begin_step(direction, walls) {
                    self.behavior_index = (index + 1) % self.behavior_loop.len();
                }
            }
        }
    }

    /// Restarts the idle routine from its first entry.
    fn rearm_behavior(&mut self) {
        self.behavior_index = 0;
        self.stand_remaining_ms = None;
    }

    fn position_px(&self) -> (i32, i32) {
        match self.move_state {
            MoveState::Idle => (self.cell.x, self.cell.y),
            MoveState::Stepping {
                direction,
                remaining_px,
            } => {
                let (dx, dy) = direction.delta_px();
                (
                    self.cell.x - dx / TILE_SIZE_PX * remaining_px,
                    self.cell.y - dy / TILE_SIZE_PX * remaining_px,
                )
            }
        }
    }

    fn sprite(&self) -> ActorSprite {
        let (x_px, y_px) = self.position_px();
        ActorSprite {
            x_px,
            y_px,
            facing: self.facing,
            is_player: self.is_player,
        }
    }
}
