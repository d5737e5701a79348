use glam::Vec2;
use strata::{EngineContext, FrameClock, Game, GameConfig, LevelError, ViewUniform};

/// Zoom change per second while a zoom key is held.
pub const ZOOM_SPEED: f32 = 5.0;

/// Generic game runner that wires up the engine loop.
///
/// The host calls [`GameRunner::tick`] once per displayed frame with the
/// elapsed wall time; the runner turns that into fixed ticks, steps the level
/// and drifts the camera toward the game's target.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    clock: FrameClock,
    config: GameConfig,
}

impl<G: Game> GameRunner<G> {
    /// Load the game's level and run its `init`.
    pub fn new(mut game: G) -> Result<Self, LevelError> {
        let config = game.config();
        let level = game.load_level(&config)?.with_physics(config.physics());
        let mut ctx = EngineContext::new(level, &config);
        game.init(&mut ctx);

        let grid = ctx.level.grid();
        log::info!(
            "game initialized: {}x{} tile level, {} entities, viewport {}x{}",
            grid.columns,
            grid.rows,
            ctx.level.scene.len(),
            config.viewport_width,
            config.viewport_height,
        );

        Ok(Self {
            game,
            ctx,
            clock: FrameClock::new(config.fixed_dt, config.max_steps_per_frame),
            config,
        })
    }

    /// Run one host frame. Returns the number of fixed ticks that ran.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        let steps = self.clock.advance(frame_dt);
        let dt = self.clock.dt();
        for _ in 0..steps {
            self.game.update(&mut self.ctx, dt);

            let game = &mut self.game;
            self.ctx.level.update(dt, |entity, dt| game.update_entity(entity, dt));

            if let Some(target) = self.game.camera_target(&self.ctx) {
                self.ctx.camera.lerp_look_at(target, self.config.camera_follow_lerp);
            }
        }
        steps
    }

    /// Zoom in (`direction > 0`) or out (`direction < 0`) for a held key.
    pub fn zoom(&mut self, direction: f32, frame_dt: f32) {
        self.ctx.camera.zoom_by(direction.clamp(-1.0, 1.0) * ZOOM_SPEED * frame_dt);
    }

    /// Snap the camera straight to the game's target, skipping the drift.
    pub fn snap_camera(&mut self) {
        if let Some(target) = self.game.camera_target(&self.ctx) {
            self.ctx.camera.look_at(target);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Leftover fraction of a tick, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Ticks run since the runner was created.
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn view_uniform(&self) -> ViewUniform {
        self.ctx.camera.view_uniform()
    }

    /// World point at the centre of the screen.
    pub fn camera_center(&self) -> Vec2 {
        self.ctx.camera.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata::{Entity, EntityId, Level, MapDescriptor};

    /// 64x24 tiles with a floor on row 20.
    fn map() -> MapDescriptor {
        let (columns, rows) = (64u32, 24u32);
        let mut gids = vec![0; (columns * rows) as usize];
        for x in 0..columns as usize {
            gids[x + columns as usize * 20] = 1;
        }
        MapDescriptor {
            columns,
            rows,
            tile_width: 32,
            tile_height: 32,
            layers: vec![strata::LayerDescriptor { name: "Solid".into(), gids }],
        }
    }

    struct Walker {
        player: Option<EntityId>,
        speed: f32,
        updates: u32,
    }

    impl Walker {
        fn new(speed: f32) -> Self {
            Self {
                player: None,
                speed,
                updates: 0,
            }
        }
    }

    impl Game for Walker {
        fn config(&self) -> GameConfig {
            GameConfig {
                gravity: 60.0,
                viewport_width: 800.0,
                viewport_height: 600.0,
                ..GameConfig::default()
            }
        }

        fn load_level(&mut self, config: &GameConfig) -> Result<Level, LevelError> {
            Level::from_descriptor_with_marker(&map(), &config.solid_layer_marker)
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let player = Entity::new(EntityId(0))
                .with_tag("player")
                .with_size(16, 32)
                .with_pos(Vec2::new(100.0, 600.0));
            self.player = Some(ctx.spawn(player));
        }

        fn update(&mut self, _ctx: &mut EngineContext, _dt: f32) {
            self.updates += 1;
        }

        fn update_entity(&mut self, entity: &mut Entity, _dt: f32) {
            if entity.tag == "player" {
                entity.vel.x = self.speed;
            }
        }

        fn camera_target(&self, ctx: &EngineContext) -> Option<Vec2> {
            self.player.and_then(|id| ctx.level.scene.get(id)).map(|p| p.pos)
        }
    }

    struct Broken;

    impl Game for Broken {
        fn load_level(&mut self, _config: &GameConfig) -> Result<Level, LevelError> {
            Level::from_json("not json")
        }

        fn init(&mut self, _ctx: &mut EngineContext) {
            unreachable!("init must not run without a level");
        }
    }

    #[test]
    fn new_runs_init() {
        let runner = GameRunner::new(Walker::new(0.0)).unwrap();
        assert_eq!(runner.game().player, Some(EntityId(1)));
        assert_eq!(runner.ctx().level.scene.len(), 1);
        assert_eq!(runner.config().gravity, 60.0);
        assert_eq!(runner.ctx().level.physics.gravity, 60.0);
    }

    #[test]
    fn level_errors_surface_from_new() {
        assert!(matches!(GameRunner::new(Broken), Err(LevelError::Json(_))));
    }

    #[test]
    fn tick_runs_fixed_steps() {
        let mut runner = GameRunner::new(Walker::new(0.0)).unwrap();
        let dt = runner.config().fixed_dt;
        assert_eq!(runner.tick(dt * 3.0 + dt * 0.5), 3);
        assert_eq!(runner.game().updates, 3);
        assert_eq!(runner.ctx().level.frame(), 3);
        assert!(runner.alpha() > 0.0);
    }

    #[test]
    fn player_lands_and_walks() {
        let mut runner = GameRunner::new(Walker::new(3.0)).unwrap();
        let dt = runner.config().fixed_dt;
        for _ in 0..120 {
            runner.tick(dt);
        }
        let player = runner.ctx().level.scene.find_by_tag("player").unwrap();
        assert!(player.grounded());
        assert_eq!(player.bounds().bottom(), 640);
        assert_eq!(player.pos.x, 100.0 + 3.0 * 120.0);
    }

    #[test]
    fn camera_follows_player_inside_limits() {
        let mut runner = GameRunner::new(Walker::new(4.0)).unwrap();
        let dt = runner.config().fixed_dt;
        let start = runner.camera_center();
        for _ in 0..300 {
            runner.tick(dt);
        }
        let center = runner.camera_center();
        assert!(center.x > start.x, "camera did not follow: {:?} -> {:?}", start, center);

        let limits = runner.ctx().level.bounds();
        let (min, max) = runner.ctx().camera.visible_rect();
        assert!(min.x >= -1e-3 && min.y >= -1e-3);
        assert!(max.x <= limits.right() as f32 + 1e-3 && max.y <= limits.bottom() as f32 + 1e-3);
    }

    #[test]
    fn zoom_keys_respect_level_floor() {
        let mut runner = GameRunner::new(Walker::new(0.0)).unwrap();
        // 2048x768 level, 800x600 viewport: floor is 600/768.
        for _ in 0..60 {
            runner.zoom(-1.0, 1.0 / 60.0);
        }
        let floor = 600.0 / 768.0;
        assert!((runner.ctx().camera.zoom() - floor).abs() < 1e-5);

        runner.zoom(1.0, 0.1);
        assert!((runner.ctx().camera.zoom() - (floor + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn snap_camera_centres_on_target() {
        let mut runner = GameRunner::new(Walker::new(0.0)).unwrap();
        runner.ctx_mut().level.scene.find_by_tag_mut("player").unwrap().pos = Vec2::new(1000.0, 400.0);
        runner.snap_camera();
        assert!((runner.camera_center() - Vec2::new(1000.0, 400.0)).length() < 1e-3);
    }
}
