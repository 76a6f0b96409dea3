//! Sandbox script module
//!
//! Sample game logic built only against the script façades. The host loads
//! it by name; it never touches engine internals.

use rune_core::Vector3;
use rune_script::{Entity, Hooks, Input, Keycode, ScriptBehaviour, ScriptContext, ScriptError, ScriptModule};

pub const MODULE: &str = "Sandbox";
pub const PLAYER: &str = "Sandbox.Player";

/// The sandbox module with all of its classes.
pub fn module() -> ScriptModule {
    ScriptModule::new(MODULE).class("Player", Hooks::ON_CREATE | Hooks::ON_UPDATE, Player::boxed)
}

/// Keypad movement controller.
#[derive(Debug, Default)]
pub struct Player;

impl Player {
    /// Units per second.
    pub const SPEED: f32 = 5.0;

    fn boxed() -> Box<dyn ScriptBehaviour> {
        Box::new(Player)
    }

    fn direction(ctx: &ScriptContext<'_, '_>) -> Result<Vector3, ScriptError> {
        let mut velocity = Vector3::ZERO;
        if Input::is_key_held(ctx, Keycode::Keypad8)? {
            velocity.z += 1.0;
        }
        if Input::is_key_held(ctx, Keycode::Keypad2)? {
            velocity.z -= 1.0;
        }
        if Input::is_key_held(ctx, Keycode::Keypad6)? {
            velocity.x += 1.0;
        }
        if Input::is_key_held(ctx, Keycode::Keypad4)? {
            velocity.x -= 1.0;
        }
        Ok(velocity)
    }
}

impl ScriptBehaviour for Player {
    fn on_create(&mut self, ctx: &mut ScriptContext<'_, '_>) -> Result<(), ScriptError> {
        ctx.info("Player.OnCreate()");
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut ScriptContext<'_, '_>, delta: f32) -> Result<(), ScriptError> {
        let velocity = Self::direction(ctx)? * (Self::SPEED * delta);
        let entity: Entity = ctx.entity();
        let translation = entity.translation(ctx)? + velocity;
        entity.set_translation(ctx, translation)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use rune_core::{EntityId, World};
    use rune_script::internal_calls::INPUT_IS_KEY_HELD;
    use rune_script::{
        BindingError, LifecycleState, MemorySink, ModuleLoadError, ParamKind, ReturnKind, ScriptEngine, Signature,
        StubDecl,
    };
    use rune_services::InputSystem;

    struct Harness {
        world: World,
        input: InputSystem,
        engine: ScriptEngine,
        sink: Rc<MemorySink>,
        player: EntityId,
    }

    impl Harness {
        fn new() -> Self {
            let sink = Rc::new(MemorySink::new());
            let mut engine = ScriptEngine::new(sink.clone());
            engine.load_module(module()).unwrap();
            let mut world = World::new();
            let player = world.spawn_with_id(EntityId::from_bits(42), "Player").unwrap();
            engine.instantiate(&world, MODULE, PLAYER, player).unwrap();
            Self {
                world,
                input: InputSystem::new(),
                engine,
                sink,
                player,
            }
        }

        fn frame(&mut self, held: &[Keycode], delta: f32) {
            self.input.new_frame();
            self.input.clear();
            for key in held {
                self.input.key_pressed(*key);
            }
            let report = self.engine.update(&mut self.world, &self.input, delta).unwrap();
            assert!(report.is_clean(), "{:?}", report.errors);
        }

        fn translation(&self) -> Vector3 {
            self.world.translation(self.player).unwrap()
        }
    }

    #[test]
    fn keypad8_moves_forward_on_z() {
        let mut h = Harness::new();
        h.frame(&[Keycode::Keypad8], 0.1);
        assert!(h.translation().abs_diff_eq(Vector3::new(0.0, 0.0, 0.5), 1e-6));
        assert_eq!(h.sink.messages(), vec!["Player.OnCreate()"]);
        assert_eq!(h.engine.instance_state(h.player), Some(LifecycleState::Updating));
    }

    #[test]
    fn no_keys_means_no_movement() {
        let mut h = Harness::new();
        h.frame(&[], 0.1);
        h.frame(&[], 3.0);
        assert_eq!(h.translation(), Vector3::ZERO);
    }

    #[test]
    fn opposite_keys_cancel_and_axes_combine() {
        let mut h = Harness::new();
        h.frame(&[Keycode::Keypad8, Keycode::Keypad2], 0.5);
        assert_eq!(h.translation(), Vector3::ZERO);
        h.frame(&[Keycode::Keypad6, Keycode::Keypad2], 0.2);
        assert!(h.translation().abs_diff_eq(Vector3::new(1.0, 0.0, -1.0), 1e-6));
        h.frame(&[Keycode::Keypad4], 0.0);
        assert!(h.translation().abs_diff_eq(Vector3::new(1.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn movement_scales_with_delta_not_frame_count() {
        let mut a = Harness::new();
        for _ in 0..4 {
            a.frame(&[Keycode::Keypad6], 0.25);
        }
        let mut b = Harness::new();
        b.frame(&[Keycode::Keypad6], 1.0);
        assert!(a.translation().abs_diff_eq(b.translation(), 1e-5));
        assert!(b.translation().abs_diff_eq(Vector3::new(5.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn writes_by_other_code_are_observed() {
        let mut h = Harness::new();
        h.frame(&[], 0.1);
        h.world.set_translation(h.player, Vector3::new(10.0, 0.0, 0.0)).unwrap();
        h.frame(&[Keycode::Keypad8], 0.2);
        assert!(h.translation().abs_diff_eq(Vector3::new(10.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn despawned_player_is_destroyed_and_never_updated() {
        let mut h = Harness::new();
        h.frame(&[Keycode::Keypad8], 0.1);
        h.world.despawn(h.player);

        let report = h.engine.update(&mut h.world, &h.input, 0.1).unwrap();
        assert_eq!((report.destroyed, report.updated), (1, 0));
        assert_eq!(h.engine.instance_state(h.player), None);
        assert!(h.world.translation(h.player).is_err());
    }

    #[test]
    fn mismatched_key_query_rejects_the_module() {
        let sink = Rc::new(MemorySink::new());
        let mut engine = ScriptEngine::new(sink.clone());
        let void_key = Signature {
            params: &[ParamKind::Keycode],
            ret: ReturnKind::Void,
        };
        let result = engine.load_module(module().declare(StubDecl::new(INPUT_IS_KEY_HELD.name, void_key)));
        assert!(matches!(
            result,
            Err(ModuleLoadError::Binding { ref errors, .. })
                if errors == &[BindingError::SignatureMismatch {
                    name: INPUT_IS_KEY_HELD.name,
                    declared: void_key,
                    native: Signature::KEY_QUERY,
                }]
        ));

        let mut world = World::new();
        let player = world.spawn("Player").unwrap();
        assert!(engine.module(MODULE).is_none());
        assert!(engine.instantiate(&world, MODULE, PLAYER, player).is_err());
        assert_eq!(engine.instance_count(), 0);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn unresolved_declaration_rejects_the_module() {
        let mut engine = ScriptEngine::new(Rc::new(MemorySink::new()));
        let err = engine
            .load_module(module().declare(StubDecl::new("Sandbox.Native::Jump", Signature::HANDLE_VECTOR_MUTATION)))
            .unwrap_err();
        assert!(matches!(err, ModuleLoadError::Binding { .. }));
        assert!(engine.module(MODULE).is_none());
    }

    #[test]
    fn null_handle_is_rejected() {
        let mut engine = ScriptEngine::new(Rc::new(MemorySink::new()));
        engine.load_module(module()).unwrap();
        let world = World::new();
        assert_eq!(
            engine.instantiate(&world, MODULE, PLAYER, EntityId::NONE),
            Err(rune_script::ScriptEngineError::NullHandle)
        );
    }
}
